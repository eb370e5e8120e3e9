//! 3-D voxel storage and the occupancy predicates the marcher can plug in.

use glam::{IVec3, Vec3};
use rand::Rng;

use super::grid::{GridError, Occupancy};

/// Occupancy oracle for the 3-D marcher.
pub trait VoxelGrid {
    fn probe(&self, cell: IVec3) -> Occupancy;
}

/// Flattened `u8` volume, indexed `z*h*w + y*w + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelVolume {
    width: u32,
    height: u32,
    depth: u32,
    data: Vec<u8>,
}

impl VoxelVolume {
    /// All-empty volume.
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self, GridError> {
        let len = volume_len(width, height, depth)?;
        Ok(Self {
            width,
            height,
            depth,
            data: vec![0; len],
        })
    }

    /// Wrap existing bytes; `bytes.len()` must equal `w*h*d`.
    pub fn from_bytes(width: u32, height: u32, depth: u32, bytes: &[u8]) -> Result<Self, GridError> {
        let expected = volume_len(width, height, depth)?;
        if bytes.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                found: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            data: bytes.to_vec(),
        })
    }

    /// Every voxel independently `0` or `255` with equal odds.
    pub fn random<R: Rng>(
        width: u32,
        height: u32,
        depth: u32,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut vol = Self::new(width, height, depth)?;
        for v in &mut vol.data {
            *v = if rng.gen_bool(0.5) { 255 } else { 0 };
        }
        Ok(vol)
    }

    #[inline]
    pub fn dims(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.depth)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32, z: u32) -> usize {
        (z as usize * self.height as usize + y as usize) * self.width as usize + x as usize
    }

    #[inline]
    fn contains(&self, c: IVec3) -> bool {
        (0..self.width as i32).contains(&c.x)
            && (0..self.height as i32).contains(&c.y)
            && (0..self.depth as i32).contains(&c.z)
    }

    /// Stored byte, `0` outside the volume.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> u8 {
        let c = IVec3::new(x, y, z);
        if self.contains(c) {
            self.data[self.index(x as u32, y as u32, z as u32)]
        } else {
            0
        }
    }

    /// Stored byte with repeat addressing, like a texture sampled with
    /// `REPEAT` wrap on every axis.
    #[inline]
    pub fn get_wrapped(&self, c: IVec3) -> u8 {
        let x = c.x.rem_euclid(self.width as i32) as u32;
        let y = c.y.rem_euclid(self.height as i32) as u32;
        let z = c.z.rem_euclid(self.depth as i32) as u32;
        self.data[self.index(x, y, z)]
    }

    pub fn set(&mut self, x: i32, y: i32, z: i32, value: u8) {
        if self.contains(IVec3::new(x, y, z)) {
            let i = self.index(x as u32, y as u32, z as u32);
            self.data[i] = value;
        }
    }
}

fn volume_len(width: u32, height: u32, depth: u32) -> Result<usize, GridError> {
    if width == 0 || height == 0 || depth == 0 {
        return Err(GridError::Empty);
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(depth as usize))
        .ok_or(GridError::TooLarge)
}

/// Raw non-zero test over the stored bytes.
impl VoxelGrid for VoxelVolume {
    #[inline]
    fn probe(&self, cell: IVec3) -> Occupancy {
        if self.contains(cell) {
            Occupancy::from_code(self.data[self.index(cell.x as u32, cell.y as u32, cell.z as u32)])
        } else {
            Occupancy::OutOfBounds
        }
    }
}

/*──────────────────────────── SDF shell ────────────────────────────*/

#[inline]
fn sd_sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

#[inline]
fn sd_box(p: Vec3, half: Vec3) -> f32 {
    let d = p.abs() - half;
    d.max_element().min(0.0) + d.max(Vec3::ZERO).length()
}

/// Analytic scene: a hollow room of radius `outer` around the origin with a
/// box that has a sphere cut out of it floating in the middle.
///
/// ```text
/// d = min(max(-sphere(p, inner), box(p, half)), -sphere(p, outer))
/// ```
/// A cell is solid when `d < 0` at its centre.
#[derive(Clone, Copy, Debug)]
pub struct SdfShell {
    pub inner: f32,
    pub half: f32,
    pub outer: f32,
}

impl Default for SdfShell {
    fn default() -> Self {
        Self {
            inner: 7.5,
            half: 6.0,
            outer: 25.0,
        }
    }
}

impl SdfShell {
    pub fn distance(&self, p: Vec3) -> f32 {
        let carved = (-sd_sphere(p, self.inner)).max(sd_box(p, Vec3::splat(self.half)));
        carved.min(-sd_sphere(p, self.outer))
    }
}

impl VoxelGrid for SdfShell {
    #[inline]
    fn probe(&self, cell: IVec3) -> Occupancy {
        let centre = cell.as_vec3() + Vec3::splat(0.5);
        if self.distance(centre) < 0.0 {
            Occupancy::Solid(u8::MAX)
        } else {
            Occupancy::Empty
        }
    }
}

/*─────────────────────────── carved noise ──────────────────────────*/

/// Tiled noise volume with an empty sphere of `radius` carved around the
/// origin. Outside the sphere a cell is solid where the stored byte is zero.
#[derive(Clone, Copy, Debug)]
pub struct CarvedNoise<'a> {
    pub volume: &'a VoxelVolume,
    pub radius: f32,
}

impl<'a> CarvedNoise<'a> {
    pub const DEFAULT_RADIUS: f32 = 30.0;

    pub fn new(volume: &'a VoxelVolume) -> Self {
        Self {
            volume,
            radius: Self::DEFAULT_RADIUS,
        }
    }
}

impl VoxelGrid for CarvedNoise<'_> {
    #[inline]
    fn probe(&self, cell: IVec3) -> Occupancy {
        let centre = cell.as_vec3() + Vec3::splat(0.5);
        if centre.length() > self.radius && self.volume.get_wrapped(cell) == 0 {
            Occupancy::Solid(u8::MAX)
        } else {
            Occupancy::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn index_order_matches_layout() {
        let mut bytes = vec![0u8; 2 * 3 * 4];
        // (x=1, y=2, z=3) → 3*3*2 + 2*2 + 1
        bytes[3 * 3 * 2 + 2 * 2 + 1] = 9;
        let vol = VoxelVolume::from_bytes(2, 3, 4, &bytes).unwrap();
        assert_eq!(vol.get(1, 2, 3), 9);
        assert_eq!(vol.probe(IVec3::new(1, 2, 3)), Occupancy::Solid(9));
        assert_eq!(vol.probe(IVec3::new(0, 2, 3)), Occupancy::Empty);
    }

    #[test]
    fn outside_is_zero_or_out_of_bounds() {
        let vol = VoxelVolume::new(4, 4, 4).unwrap();
        assert_eq!(vol.get(4, 0, 0), 0);
        assert_eq!(vol.get(0, -1, 0), 0);
        assert_eq!(vol.probe(IVec3::new(0, 0, 4)), Occupancy::OutOfBounds);
    }

    #[test]
    fn wrapped_reads_repeat() {
        let mut vol = VoxelVolume::new(4, 4, 4).unwrap();
        vol.set(1, 2, 3, 7);
        assert_eq!(vol.get_wrapped(IVec3::new(5, -2, 7)), 7);
        assert_eq!(vol.get_wrapped(IVec3::new(-3, 6, -1)), 7);
    }

    #[test]
    fn oversized_volume_is_an_error() {
        assert_eq!(VoxelVolume::new(u32::MAX, u32::MAX, 4), Err(GridError::TooLarge));
        assert_eq!(VoxelVolume::new(4, 0, 4), Err(GridError::Empty));
    }

    #[test]
    fn byte_count_is_checked() {
        assert_eq!(
            VoxelVolume::from_bytes(2, 2, 2, &[0; 7]),
            Err(GridError::SizeMismatch {
                expected: 8,
                found: 7
            })
        );
        assert_eq!(VoxelVolume::new(0, 4, 4), Err(GridError::Empty));
    }

    #[test]
    fn random_fill_is_binary_and_seeded() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let va = VoxelVolume::random(8, 8, 8, &mut a).unwrap();
        let vb = VoxelVolume::random(8, 8, 8, &mut b).unwrap();
        assert_eq!(va, vb);
        assert!(va.as_bytes().iter().all(|&v| v == 0 || v == 255));
        assert!(va.as_bytes().iter().any(|&v| v == 255));
        assert!(va.as_bytes().iter().any(|&v| v == 0));
    }

    #[test]
    fn shell_regions() {
        let shell = SdfShell::default();
        // far outside the outer sphere
        assert!(shell.probe(IVec3::new(30, 0, 0)).blocks());
        // open space between the box and the wall
        assert!(!shell.probe(IVec3::new(0, 0, -12)).blocks());
        // box corner, outside the carving sphere
        assert!(shell.probe(IVec3::new(5, 5, 5)).blocks());
        // centre of the box is carved out
        assert!(!shell.probe(IVec3::new(0, 0, 0)).blocks());
    }

    #[test]
    fn carved_noise_keeps_centre_open() {
        let vol = VoxelVolume::new(4, 4, 4).unwrap();
        let noise = CarvedNoise::new(&vol);
        assert_eq!(noise.probe(IVec3::new(3, 0, 0)), Occupancy::Empty);
        assert_eq!(noise.probe(IVec3::new(40, 0, 0)), Occupancy::Solid(u8::MAX));
    }
}
