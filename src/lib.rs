//! Grid ray traversal (2-D and 3-D DDA) and the two small demos built on it:
//! a column wall caster and a fullscreen voxel marcher.

pub mod config;
pub mod demos;
pub mod engine;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod world;
