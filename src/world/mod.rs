mod camera;
mod grid;
mod volume;

pub use camera::Camera;

pub use grid::{EMPTY, GridError, OUT_OF_BOUNDS, Occupancy, TileGrid, TileMap};

pub use volume::{CarvedNoise, SdfShell, VoxelGrid, VoxelVolume};
