//! Fullscreen voxel marcher.
//!
//! ```bash
//! cargo run --release --bin voxel_march -- --scene noise --seed 7
//! ```

use anyhow::Context;
use clap::Parser;

use gridcast::{
    config::{VoxelArgs, VoxelConfig, init_logging},
    demos::{CLEAR_COLOUR, VoxelMarcher},
    platform::MinifbHost,
    renderer::Software,
    sim::{Demo, FrameDriver},
};

fn main() -> anyhow::Result<()> {
    let args = VoxelArgs::parse();
    init_logging(args.verbose);

    let cfg = VoxelConfig::try_from(args).context("invalid options")?;
    let mut demo = VoxelMarcher::new(&cfg)?;
    let mut host =
        MinifbHost::open(demo.title(), cfg.width, cfg.height).context("cannot open window")?;
    let mut renderer = Software::with_clear(CLEAR_COLOUR);

    FrameDriver::default()
        .run(&mut demo, &mut renderer, &mut host)
        .inspect_err(|e| tracing::error!("{e}"))
        .context("voxel marcher stopped")
}
