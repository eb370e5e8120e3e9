//! Rendering abstraction layer.
//!
//! *The demos never touch a pixel buffer directly.*
//! The column caster produces a list of [`DrawCall`]s and the voxel marcher
//! hands a [`FragmentProgram`] to a fullscreen pass; both go through a type
//! that implements [`Renderer`].
//!
//! * Uniforms and volume uploads mirror what a GPU back-end would need, so a
//!   hardware implementation can slot in without touching the demos.
//! * A helper blanket-impl [`RendererExt`] adds `draw_calls` so call-sites
//!   stay short.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use thiserror::Error;

use crate::world::{GridError, VoxelVolume};

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Pack linear `[0, 1]` RGB into `0x00RRGGBB`.
#[inline]
pub fn pack(c: Vec3) -> Rgba {
    let c = (c.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    ((c.x as u32) << 16) | ((c.y as u32) << 8) | c.z as u32
}

/// Scale every channel of `colour` by `factor`.
#[inline]
pub fn darken(colour: Rgba, factor: f32) -> Rgba {
    let ch = |shift: u32| (((colour >> shift) & 0xFF) as f32 * factor).round().min(255.0) as u32;
    (ch(16) << 16) | (ch(8) << 8) | ch(0)
}

/// One vertical wall slice, centred on the horizon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSpan {
    pub x: i32,
    pub height: i32,
    pub colour: Rgba,
}

/// Axis-aligned filled square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub colour: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub from: (i32, i32),
    pub to: (i32, i32),
    pub colour: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCall {
    Column(ColumnSpan),
    Rect(Rect),
    Line(Line),
}

/*──────────────────────────── uniforms ─────────────────────────────*/

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Uniform {
    Float(f32),
    Vec2(Vec2),
}

/// Named values a fragment program can read.
#[derive(Clone, Debug, Default)]
pub struct Uniforms {
    values: HashMap<String, Uniform>,
}

impl Uniforms {
    pub fn set(&mut self, name: &str, value: Uniform) {
        self.values.insert(name.to_owned(), value);
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.values.get(name)? {
            Uniform::Float(v) => Some(*v),
            Uniform::Vec2(_) => None,
        }
    }

    pub fn vec2(&self, name: &str) -> Option<Vec2> {
        match self.values.get(name)? {
            Uniform::Vec2(v) => Some(*v),
            Uniform::Float(_) => None,
        }
    }
}

/// Everything a fragment program may read besides its own coordinate.
pub struct ShaderEnv<'a> {
    pub uniforms: &'a Uniforms,
    pub volume: Option<&'a VoxelVolume>,
}

/// Per-pixel program run by [`Renderer::draw_fullscreen`].
pub trait FragmentProgram {
    /// `frag` is the pixel centre with the origin at the bottom-left corner.
    /// Returns linear RGB in `[0, 1]`.
    fn shade(&self, frag: Vec2, env: &ShaderEnv<'_>) -> Vec3;
}

/// Things that can go wrong inside a back-end.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("volume upload rejected: {0}")]
    Volume(#[from] GridError),
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
/// Software callers typically forward it to their window-manager;
/// GPU back-ends can ignore the slice because they never allocate it.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Size passed to the last `begin_frame`.
    fn frame_size(&self) -> (usize, usize);

    /// Fill one screen column, centred vertically.
    fn draw_column(&mut self, span: &ColumnSpan);

    fn draw_rect(&mut self, rect: &Rect);

    fn draw_line(&mut self, line: &Line);

    /// Run `program` once for every pixel of the frame.
    fn draw_fullscreen(&mut self, program: &dyn FragmentProgram);

    fn set_float(&mut self, name: &str, value: f32);

    fn set_vec2(&mut self, name: &str, value: Vec2);

    /// Replace the volume visible to fragment programs.
    fn upload_volume(
        &mut self,
        width: u32,
        height: u32,
        depth: u32,
        bytes: &[u8],
    ) -> Result<(), RenderError>;

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.present(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl that replays a list of [`DrawCall`]s.
pub trait RendererExt: Renderer {
    fn draw_calls(&mut self, calls: &[DrawCall]) {
        for c in calls {
            match c {
                DrawCall::Column(s) => self.draw_column(s),
                DrawCall::Rect(r) => self.draw_rect(r),
                DrawCall::Line(l) => self.draw_line(l),
            }
        }
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::Software;
