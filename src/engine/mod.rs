pub mod dda;
pub mod projection;
pub mod walls;

pub use dda::{Axis, Hit, MAX_STEPS_2D, MAX_STEPS_3D, Trace, Trace2, Trace3, cast_2d, cast_3d};
pub use projection::{ColumnRay, VoxelCamera, column_ray};
pub use walls::{View, cast_columns, minimap};
