//! Fullscreen voxel marcher: one 3-D DDA trace per pixel, shaded by the
//! face that was crossed.

use std::time::Duration;

use glam::{Vec2, Vec3};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::{
    config::{Scene, VoxelConfig},
    engine::{
        dda::{Axis, MAX_STEPS_3D, Trace3, cast_3d},
        projection::VoxelCamera,
    },
    renderer::{FragmentProgram, RenderError, Renderer, Rgba, ShaderEnv},
    sim::{Demo, InputCmd},
    world::{CarvedNoise, GridError, SdfShell, VoxelVolume},
};

/// Uniform holding the target size in pixels.
pub const RESOLUTION: &str = "resolution";
/// Uniform holding simulated seconds.
pub const TIME: &str = "time";
/// Edge length of the uploaded noise cube.
pub const VOLUME_SIZE: u32 = 64;

/// Background for pixels no program has written, `(0.85, 0, 1)`.
pub const CLEAR_COLOUR: Rgba = 0x00_D900FF;
/// Rays that exhaust their step budget.
pub const MISS_COLOUR: Vec3 = Vec3::new(1.0, 0.0, 1.0);

/// Per-pixel program: orbit camera, trace, grey by crossed axis.
#[derive(Clone, Copy, Debug)]
pub struct VoxelShader {
    pub scene: Scene,
    pub max_steps: u32,
}

impl VoxelShader {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            max_steps: MAX_STEPS_3D,
        }
    }

    fn trace(&self, origin: Vec3, dir: Vec3, volume: Option<&VoxelVolume>) -> Trace3 {
        match (self.scene, volume) {
            (Scene::Shell, _) => cast_3d(origin, dir, &SdfShell::default(), self.max_steps),
            (Scene::Noise, Some(v)) => cast_3d(origin, dir, &CarvedNoise::new(v), self.max_steps),
            // nothing uploaded yet
            (Scene::Noise, None) => Trace3::NoHit,
        }
    }
}

impl FragmentProgram for VoxelShader {
    fn shade(&self, frag: Vec2, env: &ShaderEnv<'_>) -> Vec3 {
        let resolution = env.uniforms.vec2(RESOLUTION).unwrap_or(Vec2::ONE);
        let time = env.uniforms.float(TIME).unwrap_or(0.0);

        let cam = VoxelCamera::orbit(time);
        let dir = cam.pixel_ray(frag, resolution);
        match self.trace(cam.pos, dir, env.volume).hit() {
            Some(hit) => Vec3::splat(match hit.axis {
                Some(Axis::X) => 0.5,
                Some(Axis::Y) => 1.0,
                Some(Axis::Z) | None => 0.75,
            }),
            None => MISS_COLOUR,
        }
    }
}

/// Uploads a random cube once, then marches it (or the shell) every frame.
pub struct VoxelMarcher {
    volume: VoxelVolume,
    shader: VoxelShader,
    resolution: Vec2,
    time: f32,
}

impl VoxelMarcher {
    /// Fill the noise cube from `cfg.seed`, or from OS entropy without one.
    pub fn new(cfg: &VoxelConfig) -> Result<Self, GridError> {
        let mut rng = cfg.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let volume = VoxelVolume::random(VOLUME_SIZE, VOLUME_SIZE, VOLUME_SIZE, &mut rng)?;
        Ok(Self {
            volume,
            shader: VoxelShader::new(cfg.scene),
            resolution: Vec2::new(cfg.width as f32, cfg.height as f32),
            time: 0.0,
        })
    }
}

impl Demo for VoxelMarcher {
    fn title(&self) -> &str {
        "voxel marcher"
    }

    fn on_load<R: Renderer>(&mut self, renderer: &mut R) -> Result<(), RenderError> {
        let (w, h, d) = self.volume.dims();
        renderer.upload_volume(w, h, d, self.volume.as_bytes())?;
        renderer.set_vec2(RESOLUTION, self.resolution);
        info!(scene = ?self.shader.scene, w, h, d, "voxel volume ready");
        Ok(())
    }

    /// The camera path is scripted; input is ignored.
    fn on_update(&mut self, _dt: f32, sim_time: Duration, _cmd: InputCmd) {
        self.time = sim_time.as_secs_f32();
    }

    fn on_render<R: Renderer>(&mut self, renderer: &mut R) {
        renderer.set_float(TIME, self.time);
        renderer.draw_fullscreen(&self.shader);
    }
}
