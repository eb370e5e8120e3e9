//! The two runnable demos, each a [`Demo`](crate::sim::Demo) the frame
//! driver can host.

mod voxels;
mod walls;

pub use voxels::{CLEAR_COLOUR, MISS_COLOUR, RESOLUTION, TIME, VOLUME_SIZE, VoxelMarcher, VoxelShader};
pub use walls::WallCaster;
