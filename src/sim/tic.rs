use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::InputCmd;
use super::components::InputFrame;
use crate::error::DemoError;
use crate::platform::PlatformError;
use crate::renderer::{RenderError, Renderer, Rgba};

/// Length of one simulation tick.
pub const TIC: Duration = Duration::from_millis(16);
/// `TIC` in seconds, handed to every update.
pub const DT: f32 = 0.016;

/// Frames between two statistics reports.
const STATS_EVERY: u64 = 20;
/// Catch-up bursts longer than this are logged.
const BACKLOG_WARN: u32 = 60;

/*──────────────────────────── collaborators ────────────────────────────*/

/// Monotonic time since the driver started.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Hand-driven clock; clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<Duration>>);

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Duration {
        self.0.get()
    }
}

/// Polled once per outer loop iteration.
pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

/// Where finished frames go.
pub trait Presenter {
    /// Frame size the renderer should produce.
    fn size(&self) -> (usize, usize);

    fn present(&mut self, frame: &[Rgba], width: usize, height: usize) -> Result<(), PlatformError>;

    fn set_title(&mut self, _title: &str) {}
}

/// The four hooks a demo hands to the [`FrameDriver`].
pub trait Demo {
    fn title(&self) -> &str;

    /// Runs once before the first frame.
    fn on_load<R: Renderer>(&mut self, _renderer: &mut R) -> Result<(), RenderError> {
        Ok(())
    }

    /// One fixed tick: `dt` is always [`DT`], `sim_time` the tick's end.
    fn on_update(&mut self, dt: f32, sim_time: Duration, cmd: InputCmd);

    /// Draw the current state between `begin_frame` and `end_frame`.
    fn on_render<R: Renderer>(&mut self, renderer: &mut R);

    /// Runs once after the last frame.
    fn on_teardown(&mut self) {}
}

/*──────────────────────────── driver ────────────────────────────*/

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Fixed-timestep loop: simulation advances in [`TIC`] steps to catch up
/// with the clock, then exactly one frame is rendered and presented.
pub struct FrameDriver<C: Clock = SystemClock> {
    clock: C,
    sim_time: Duration,
    state: LoopState,
    frames: u64,
}

impl Default for FrameDriver<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock::default())
    }
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            sim_time: Duration::ZERO,
            state: LoopState::Running,
            frames: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn sim_time(&self) -> Duration {
        self.sim_time
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Load, loop until the input source asks to quit, tear down.
    pub fn run<D, R, H>(&mut self, demo: &mut D, renderer: &mut R, host: &mut H) -> Result<(), DemoError>
    where
        D: Demo,
        R: Renderer,
        H: InputSource + Presenter,
    {
        demo.on_load(renderer)?;
        info!(demo = demo.title(), "loaded");

        let mut result = Ok(());
        while self.state == LoopState::Running {
            if let Err(e) = self.iterate(demo, renderer, host) {
                result = Err(e);
                break;
            }
        }

        demo.on_teardown();
        info!(demo = demo.title(), frames = self.frames, "stopped");
        result
    }

    /// One outer iteration. Returns how many updates ran.
    ///
    /// A quit seen while polling still lets this iteration finish its
    /// updates and its frame.
    pub fn iterate<D, R, H>(&mut self, demo: &mut D, renderer: &mut R, host: &mut H) -> Result<u32, DemoError>
    where
        D: Demo,
        R: Renderer,
        H: InputSource + Presenter,
    {
        let input = host.poll();
        if input.quit && self.state == LoopState::Running {
            debug!("quit requested");
            self.state = LoopState::Stopped;
        }

        let frame_start = self.clock.now();
        let updates = self.catch_up(frame_start, |dt, t| demo.on_update(dt, t, input.cmd));

        let (w, h) = host.size();
        renderer.begin_frame(w, h);
        demo.on_render(renderer);
        let mut presented = Ok(());
        renderer.end_frame(|fb, w, h| presented = host.present(fb, w, h));
        presented?;

        self.frames += 1;
        if self.frames % STATS_EVERY == 0 {
            self.report(frame_start, demo.title(), host);
        }
        Ok(updates)
    }

    /// Advance simulated time in whole ticks while it lags `now` by at
    /// least one tick; the remainder carries over to the next call.
    fn catch_up<F>(&mut self, now: Duration, mut update: F) -> u32
    where
        F: FnMut(f32, Duration),
    {
        let mut n = 0;
        while now.saturating_sub(self.sim_time) >= TIC {
            self.sim_time += TIC;
            update(DT, self.sim_time);
            n += 1;
        }
        if n > BACKLOG_WARN {
            warn!(updates = n, "simulation fell behind the clock");
        }
        n
    }

    fn report<P: Presenter>(&self, frame_start: Duration, title: &str, host: &mut P) {
        let now = self.clock.now();
        let frame_ms = (now - frame_start).as_secs_f64() * 1000.0;
        let fps = 1000.0 / frame_ms.max(1e-3);
        let avg = self.frames as f64 / now.as_secs_f64().max(1e-3);
        debug!(frame_ms, fps, avg, "frame stats");
        host.set_title(&format!(
            "{title} | {frame_ms:.0} ms/frame - {fps:7.2} frames/s - {avg:7.2} frames/s avg"
        ));
    }
}
