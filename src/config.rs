//! Command-line options for both demos, validated into plain configs.
//!
//! Every flag is optional; without any the demos run their stock setup.

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::{
    engine::projection::MAX_HALF_FOV,
    sim::{HALF_FOV, MOVE_SPEED, Player, TILE_SIZE, TURN_RATE},
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("resolution {width}x{height} has a zero side")]
    Resolution { width: usize, height: usize },
    #[error("half field of view {0} must lie in (0, 89] degrees")]
    Fov(f32),
    #[error("{name} must be finite and not negative, got {value}")]
    Rate { name: &'static str, value: f32 },
}

/// Top-down column caster over a tile arena.
#[derive(Parser, Debug, Clone)]
#[command(name = "wall_caster", version, about)]
pub struct WallArgs {
    /// Window width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: usize,

    /// Half field of view in degrees
    #[arg(long, default_value_t = HALF_FOV)]
    pub fov: f32,

    /// Walking speed in map units per second
    #[arg(long, default_value_t = MOVE_SPEED)]
    pub speed: f32,

    /// Turn rate in degrees per second
    #[arg(long, default_value_t = TURN_RATE)]
    pub turn_rate: f32,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallConfig {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub player: Player,
}

impl TryFrom<WallArgs> for WallConfig {
    type Error = ConfigError;

    fn try_from(args: WallArgs) -> Result<Self, Self::Error> {
        check_resolution(args.width, args.height)?;
        if !(args.fov > 0.0 && args.fov <= MAX_HALF_FOV) {
            return Err(ConfigError::Fov(args.fov));
        }
        let speed = check_rate("speed", args.speed)?;
        let turn_rate = check_rate("turn rate", args.turn_rate)?;

        let mut player = Player {
            speed,
            turn_rate,
            ..Player::default()
        };
        player.camera.fov = args.fov;
        Ok(Self {
            width: args.width,
            height: args.height,
            tile_size: TILE_SIZE,
            player,
        })
    }
}

/// Which occupancy predicate the voxel marcher traces against.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scene {
    /// Hollowed box inside a spherical shell
    #[default]
    Shell,
    /// Random volume with a clearing around the camera
    Noise,
}

/// Fullscreen voxel marcher.
#[derive(Parser, Debug, Clone)]
#[command(name = "voxel_march", version, about)]
pub struct VoxelArgs {
    /// Window width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 450)]
    pub height: usize,

    /// Occupancy predicate to trace
    #[arg(long, value_enum, default_value_t = Scene::Shell)]
    pub scene: Scene,

    /// Seed for the random volume; drawn from the OS when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelConfig {
    pub width: usize,
    pub height: usize,
    pub scene: Scene,
    pub seed: Option<u64>,
}

impl TryFrom<VoxelArgs> for VoxelConfig {
    type Error = ConfigError;

    fn try_from(args: VoxelArgs) -> Result<Self, Self::Error> {
        check_resolution(args.width, args.height)?;
        Ok(Self {
            width: args.width,
            height: args.height,
            scene: args.scene,
            seed: args.seed,
        })
    }
}

fn check_resolution(width: usize, height: usize) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::Resolution { width, height });
    }
    Ok(())
}

fn check_rate(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Rate { name, value });
    }
    Ok(value)
}

/// Install the global `tracing` subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // a second install (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
