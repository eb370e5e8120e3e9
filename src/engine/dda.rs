//! Grid traversal by digital differential analysis.
//!
//! One const-generic walker serves both the 2-D column caster and the 3-D
//! voxel marcher: the axis count is the only difference between them.
//!
//! ```text
//! delta[a] = |1 / dir[a]|              cost of crossing one cell along a
//! side[a]  = distance to the next boundary along a
//! loop: probe cell → stop if blocked
//!       a = argmin(side)  (ties → lower axis)
//!       side[a] += delta[a]; cell[a] += step[a]
//! ```
//!
//! The reported distance is measured along `dir` in units of its length, so a
//! direction whose forward component is 1 yields the perpendicular (fisheye
//! free) distance.

use glam::{IVec2, IVec3, Vec2, Vec3};

use crate::world::{Occupancy, TileGrid, VoxelGrid};

/// Step budget of the 2-D column caster.
pub const MAX_STEPS_2D: u32 = 1000;
/// Step budget of the voxel marcher.
pub const MAX_STEPS_3D: u32 = 128;

/// Direction components smaller than this are treated as zero.
const DIR_EPSILON: f32 = 1e-5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_index(i: usize) -> Self {
        match i {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }
}

/// First blocking cell a ray entered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit<C, V> {
    pub cell: C,
    /// Axis crossed on the final step. `None` only when the ray starts inside
    /// a blocking cell.
    pub axis: Option<Axis>,
    /// Accumulated side distances at the moment of the hit.
    pub side_dist: V,
    /// Distance to the crossed boundary, in units of the direction length.
    pub perp_distance: f32,
    pub occupancy: Occupancy,
    /// Cells stepped before the hit.
    pub steps: u32,
}

impl<C, V> Hit<C, V> {
    #[inline]
    pub fn crossed(&self, axis: Axis) -> bool {
        self.axis == Some(axis)
    }
}

/// Outcome of one traversal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Trace<C, V> {
    Hit(Hit<C, V>),
    /// Step budget exhausted, or the direction was zero.
    NoHit,
}

impl<C, V> Trace<C, V> {
    #[inline]
    pub fn hit(self) -> Option<Hit<C, V>> {
        match self {
            Trace::Hit(h) => Some(h),
            Trace::NoHit => None,
        }
    }

    fn map<C2, V2>(self, f: impl FnOnce(Hit<C, V>) -> Hit<C2, V2>) -> Trace<C2, V2> {
        match self {
            Trace::Hit(h) => Trace::Hit(f(h)),
            Trace::NoHit => Trace::NoHit,
        }
    }
}

pub type Trace2 = Trace<IVec2, Vec2>;
pub type Trace3 = Trace<IVec3, Vec3>;

/// `-1`, `0` or `+1` with a dead zone around zero.
#[inline]
pub fn step_sign(x: f32) -> i32 {
    if x.abs() < DIR_EPSILON {
        0
    } else if x < 0.0 {
        -1
    } else {
        1
    }
}

/*──────────────────────────── ray state ────────────────────────────*/

/// Per-ray scratch; created for every cast and dropped afterwards.
struct RayState<const N: usize> {
    cell: [i32; N],
    step: [i32; N],
    side: [f32; N],
    delta: [f32; N],
}

impl<const N: usize> RayState<N> {
    /// `None` when no axis moves at all.
    fn new(origin: [f32; N], dir: [f32; N]) -> Option<Self> {
        let mut cell = [0; N];
        let mut step = [0; N];
        let mut side = [f32::INFINITY; N];
        let mut delta = [f32::INFINITY; N];

        for a in 0..N {
            cell[a] = origin[a].floor() as i32;
            step[a] = step_sign(dir[a]);
            if step[a] == 0 {
                continue;
            }
            let s = step[a] as f32;
            delta[a] = (1.0 / dir[a]).abs();
            side[a] = (s * (cell[a] as f32 - origin[a]) + s * 0.5 + 0.5) * delta[a];
        }

        step.iter().any(|&s| s != 0).then_some(Self {
            cell,
            step,
            side,
            delta,
        })
    }

    /// Axis with the nearest boundary; the earlier axis wins ties.
    #[inline]
    fn nearest_axis(&self) -> usize {
        let mut best = 0;
        for a in 1..N {
            if self.side[a] < self.side[best] {
                best = a;
            }
        }
        best
    }

    #[inline]
    fn advance(&mut self) -> usize {
        let a = self.nearest_axis();
        self.side[a] += self.delta[a];
        self.cell[a] += self.step[a];
        a
    }
}

/// Walk cells from `origin` along `dir` until `probe` reports a blocking
/// cell or `max_steps` cells have been examined.
fn traverse<const N: usize, F>(
    origin: [f32; N],
    dir: [f32; N],
    max_steps: u32,
    mut probe: F,
) -> Trace<[i32; N], [f32; N]>
where
    F: FnMut([i32; N]) -> Occupancy,
{
    let Some(mut ray) = RayState::new(origin, dir) else {
        return Trace::NoHit;
    };
    let mut last: Option<usize> = None;

    for steps in 0..max_steps {
        let occupancy = probe(ray.cell);
        if occupancy.blocks() {
            let perp_distance = last.map_or(0.0, |a| {
                let s = ray.step[a] as f32;
                (ray.cell[a] as f32 - origin[a] + (1.0 - s) / 2.0) / dir[a]
            });
            return Trace::Hit(Hit {
                cell: ray.cell,
                axis: last.map(Axis::from_index),
                side_dist: ray.side,
                perp_distance,
                occupancy,
                steps,
            });
        }
        last = Some(ray.advance());
    }
    Trace::NoHit
}

/*──────────────────────────── public API ───────────────────────────*/

/// Cast a ray through a tile map. `origin` is in cell units.
pub fn cast_2d<G: TileGrid + ?Sized>(origin: Vec2, dir: Vec2, grid: &G, max_steps: u32) -> Trace2 {
    traverse(origin.to_array(), dir.to_array(), max_steps, |c| {
        grid.probe(IVec2::from_array(c))
    })
    .map(|h| Hit {
        cell: IVec2::from_array(h.cell),
        axis: h.axis,
        side_dist: Vec2::from_array(h.side_dist),
        perp_distance: h.perp_distance,
        occupancy: h.occupancy,
        steps: h.steps,
    })
}

/// Cast a ray through a voxel grid. `origin` is in cell units.
pub fn cast_3d<G: VoxelGrid + ?Sized>(origin: Vec3, dir: Vec3, grid: &G, max_steps: u32) -> Trace3 {
    traverse(origin.to_array(), dir.to_array(), max_steps, |c| {
        grid.probe(IVec3::from_array(c))
    })
    .map(|h| Hit {
        cell: IVec3::from_array(h.cell),
        axis: h.axis,
        side_dist: Vec3::from_array(h.side_dist),
        perp_distance: h.perp_distance,
        occupancy: h.occupancy,
        steps: h.steps,
    })
}
