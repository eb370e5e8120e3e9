use glam::{Vec2, Vec3, vec2};

use crate::world::Camera;

/// Widest half-angle a column projector accepts (degrees).
pub const MAX_HALF_FOV: f32 = 89.0;

/// Ray for one screen column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnRay {
    /// Absolute heading of the ray in degrees.
    pub angle: f32,
    /// Points along `angle`, scaled so its component along the camera
    /// heading is exactly 1.
    pub dir: Vec2,
}

impl ColumnRay {
    /// Unit vector along the ray.
    #[inline]
    pub fn unit(&self) -> Vec2 {
        let (s, c) = self.angle.to_radians().sin_cos();
        vec2(c, s)
    }
}

/// Map column `x` of a `width`-wide screen to a ray.
///
/// ```text
/// screen_x = x / width * 2 - 1            ∈ [-1, 1)
/// angle    = yaw + screen_x * fov
/// dir      = unit(angle) / cos(angle - yaw)
/// ```
pub fn column_ray(cam: &Camera, x: usize, width: usize) -> ColumnRay {
    let screen_x = (x as f32 / width.max(1) as f32) * 2.0 - 1.0;
    let offset = screen_x * cam.fov;
    let angle = cam.yaw + offset;
    let (s, c) = angle.to_radians().sin_cos();
    let along = offset.to_radians().cos().max(MAX_HALF_FOV.to_radians().cos());
    ColumnRay {
        angle,
        dir: vec2(c, s) / along,
    }
}

/// Pinhole camera for the voxel marcher.
///
/// `forward` is not normalised: its length acts as the focal distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelCamera {
    pub pos: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for VoxelCamera {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, 0.0, -12.0),
            forward: Vec3::new(0.0, 0.0, 0.8),
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

/// Rotate the xz-components of `v` by `angle` radians.
#[inline]
fn rotate_xz(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x * c - v.z * s, v.y, v.z * c + v.x * s)
}

impl VoxelCamera {
    /// Scripted fly-around at time `t` seconds: bob up and down while
    /// circling the origin at radius 12.
    pub fn orbit(t: f32) -> Self {
        let base = Self::default();
        let pos = Vec3::new(0.0, 2.0 * (t * 2.7).sin(), base.pos.z);
        Self {
            pos: rotate_xz(pos, t),
            forward: rotate_xz(base.forward, t),
            right: rotate_xz(base.right, t),
            up: base.up,
        }
    }

    /// Ray direction through fragment `frag` (pixel centre, origin at the
    /// bottom-left) of a `resolution`-sized target.
    pub fn pixel_ray(&self, frag: Vec2, resolution: Vec2) -> Vec3 {
        let screen = frag / resolution * 2.0 - Vec2::ONE;
        let aspect = resolution.y / resolution.x;
        self.forward + screen.x * self.right + screen.y * self.up * aspect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dda::{Axis, MAX_STEPS_2D, cast_2d};
    use crate::world::TileMap;

    #[test]
    fn centre_column_follows_heading() {
        let cam = Camera::new(Vec2::ZERO, 30.0, 60.0);
        let ray = column_ray(&cam, 400, 800);
        assert!((ray.angle - 30.0).abs() < 1e-5);
        assert!((ray.dir - cam.forward()).length() < 1e-5);
    }

    #[test]
    fn edge_columns_span_the_fov() {
        let cam = Camera::new(Vec2::ZERO, 0.0, 60.0);
        let left = column_ray(&cam, 0, 800);
        assert!((left.angle + 60.0).abs() < 1e-5);
        let last = column_ray(&cam, 799, 800);
        assert!(last.angle < 60.0 && last.angle > 59.0);
        // forward component is always one
        assert!((left.dir.dot(cam.forward()) - 1.0).abs() < 1e-5);
        assert!((last.dir.dot(cam.forward()) - 1.0).abs() < 1e-4);
        assert!((left.unit().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn flat_wall_distance_is_angle_independent() {
        let map = TileMap::bordered(10, 10, 1).unwrap();
        let origin = Vec2::new(5.5, 5.5);

        // straight ahead, any fov
        for fov in [30.0, 45.0, 60.0] {
            let cam = Camera::new(origin, 0.0, fov);
            let ray = column_ray(&cam, 400, 800);
            let hit = cast_2d(origin, ray.dir, &map, MAX_STEPS_2D).hit().unwrap();
            assert!((hit.perp_distance - 3.5).abs() < 1e-5);
        }

        // 30° to the side, same wall
        let cam = Camera::new(origin, 0.0, 60.0);
        let ray = column_ray(&cam, 600, 800);
        assert!((ray.angle - 30.0).abs() < 1e-4);
        let hit = cast_2d(origin, ray.dir, &map, MAX_STEPS_2D).hit().unwrap();
        assert_eq!(hit.axis, Some(Axis::X));
        assert_eq!(hit.cell.x, 9);
        assert!((hit.perp_distance - 3.5).abs() < 1e-4);
        let raw = hit.perp_distance * ray.dir.length();
        assert!(raw > 3.5 + 0.5);
        assert!((raw - 3.5 / 30f32.to_radians().cos()).abs() < 1e-3);
    }

    #[test]
    fn centre_pixel_looks_forward() {
        let cam = VoxelCamera::default();
        let res = Vec2::new(800.0, 450.0);
        let dir = cam.pixel_ray(res * 0.5, res);
        assert!((dir - cam.forward).length() < 1e-6);
    }

    #[test]
    fn vertical_extent_is_aspect_corrected() {
        let cam = VoxelCamera::default();
        let res = Vec2::new(800.0, 450.0);
        let top = cam.pixel_ray(Vec2::new(400.0, 450.0), res);
        let right = cam.pixel_ray(Vec2::new(800.0, 225.0), res);
        assert!((top.y - 450.0 / 800.0).abs() < 1e-6);
        assert!((right.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orbit_keeps_radius_and_faces_inward_at_start() {
        let cam = VoxelCamera::orbit(0.0);
        assert_eq!(cam, VoxelCamera::default());
        for t in [0.5, 1.7, 4.0] {
            let cam = VoxelCamera::orbit(t);
            let r = Vec2::new(cam.pos.x, cam.pos.z).length();
            assert!((r - 12.0).abs() < 1e-4);
            assert!(cam.forward.dot(-cam.pos.with_y(0.0)) > 0.0);
        }
    }
}
