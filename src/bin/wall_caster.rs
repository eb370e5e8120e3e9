//! Column wall caster over the built-in tile arena.
//!
//! ```bash
//! cargo run --release -- --fov 45
//! ```
//! W/S or Up/Down walk, A/D or Left/Right turn, Q/E strafe, Esc quits.

use anyhow::Context;
use clap::Parser;

use gridcast::{
    config::{WallArgs, WallConfig, init_logging},
    demos::WallCaster,
    platform::MinifbHost,
    renderer::Software,
    sim::{Demo, FrameDriver},
};

fn main() -> anyhow::Result<()> {
    let args = WallArgs::parse();
    init_logging(args.verbose);

    let cfg = WallConfig::try_from(args).context("invalid options")?;
    let mut demo = WallCaster::from_config(&cfg);
    let mut host =
        MinifbHost::open(demo.title(), cfg.width, cfg.height).context("cannot open window")?;
    let mut renderer = Software::default();

    FrameDriver::default()
        .run(&mut demo, &mut renderer, &mut host)
        .inspect_err(|e| tracing::error!("{e}"))
        .context("wall caster stopped")
}
