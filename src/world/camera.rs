use glam::{Vec2, vec2};

/// Player view-point on the tile map.
///
/// * Angles are in **degrees** (0 = +X, growing toward +Y).
/// * `fov` is the half-angle swept to either side of the heading.
/// * `pos` is in world units; divide by the tile size to get grid cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub yaw: f32,
    pub fov: f32,
}

impl Camera {
    /// Create a new camera at `pos`, facing `yaw`, sweeping `fov` degrees to each side.
    pub fn new(pos: Vec2, yaw: f32, fov: f32) -> Self {
        Self { pos, yaw, fov }
    }

    /// Ray origin in grid-cell units.
    #[inline]
    pub fn grid_origin(&self, tile_size: f32) -> Vec2 {
        self.pos / tile_size
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector along the heading.
    #[inline(always)]
    pub fn forward(self) -> Vec2 {
        let (s, c) = self.yaw.to_radians().sin_cos();
        vec2(c, s)
    }

    /// Unit vector a quarter turn toward increasing yaw.
    #[inline(always)]
    pub fn right(self) -> Vec2 {
        self.forward().perp()
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move by `forward` units along the heading and `side` units sideways.
    pub fn step(&mut self, forward: f32, side: f32) {
        self.pos += self.forward() * forward + self.right() * side;
    }

    /// Rotate the heading by `delta` degrees.
    pub fn turn(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(360.0);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
