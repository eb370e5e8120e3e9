//! minifb window: keyboard in, finished frames out.

use minifb::{Key, Window, WindowOptions};
use thiserror::Error;
use tracing::info;

use crate::{
    renderer::Rgba,
    sim::{InputCmd, InputFrame, InputSource, Presenter},
};

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("window: {0}")]
    Window(#[from] minifb::Error),
}

/// Fixed-size desktop window driven by the frame loop.
pub struct MinifbHost {
    window: Window,
    width: usize,
    height: usize,
}

impl MinifbHost {
    pub fn open(title: &str, width: usize, height: usize) -> Result<Self, PlatformError> {
        let mut window = Window::new(title, width, height, WindowOptions::default())?;
        // presentation pacing only; the simulation keeps its own clock
        window.set_target_fps(60);
        info!(width, height, "window opened");
        Ok(Self {
            window,
            width,
            height,
        })
    }

    #[inline]
    fn down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&k| self.window.is_key_down(k))
    }
}

impl InputSource for MinifbHost {
    /// Key state is refreshed by the previous `present`.
    fn poll(&mut self) -> InputFrame {
        let quit = !self.window.is_open() || self.window.is_key_down(Key::Escape);
        let cmd = InputCmd {
            forward: InputCmd::axis(self.down(&[Key::W, Key::Up]), self.down(&[Key::S, Key::Down])),
            strafe: InputCmd::axis(self.down(&[Key::E]), self.down(&[Key::Q])),
            turn: InputCmd::axis(
                self.down(&[Key::D, Key::Right]),
                self.down(&[Key::A, Key::Left]),
            ),
        };
        InputFrame { quit, cmd }
    }
}

impl Presenter for MinifbHost {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &[Rgba], width: usize, height: usize) -> Result<(), PlatformError> {
        // closing the window is a quit, not a failure
        if !self.window.is_open() {
            return Ok(());
        }
        self.window.update_with_buffer(frame, width, height)?;
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}
