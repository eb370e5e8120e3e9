//! ---------------------------------------------------------------------------
//! Software (CPU) back-end
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format, row 0 at the top.
//! * Every write is clipped against the frame; nothing outside it is fatal.
//! * Fullscreen passes evaluate the program at pixel centres with a
//!   bottom-left origin, the way a fragment shader sees `gl_FragCoord`.
//! ---------------------------------------------------------------------------

use glam::Vec2;
use tracing::debug;

use crate::{
    renderer::{
        ColumnSpan, FragmentProgram, Line, Rect, RenderError, Renderer, Rgba, ShaderEnv, Uniform,
        Uniforms, pack,
    },
    world::VoxelVolume,
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// CPU rasteriser plus the uniform/texture state a fragment program reads.
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
    clear: Rgba,
    uniforms: Uniforms,
    volume: Option<VoxelVolume>,
}

impl Default for Software {
    fn default() -> Self {
        Self::with_clear(0x00_000000)
    }
}

impl Software {
    /// Back-end that clears every frame to `clear`.
    pub fn with_clear(clear: Rgba) -> Self {
        Self {
            scratch: Vec::new(),
            width: 0,
            height: 0,
            clear,
            uniforms: Uniforms::default(),
            volume: None,
        }
    }

    #[inline]
    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    #[inline]
    pub fn volume(&self) -> Option<&VoxelVolume> {
        self.volume.as_ref()
    }

    /// Pixel at `(x, y)` of the frame in progress, row 0 at the top.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.scratch[y * self.width + x])
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, colour: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = colour;
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(self.clear);
    }

    fn frame_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn draw_column(&mut self, span: &ColumnSpan) {
        if !(0..self.width as i32).contains(&span.x) || span.height <= 0 {
            return;
        }
        let top = self.height as i32 / 2 - span.height / 2;
        let y0 = top.max(0);
        let y1 = (top + span.height).min(self.height as i32);
        for y in y0..y1 {
            self.scratch[y as usize * self.width + span.x as usize] = span.colour;
        }
    }

    fn draw_rect(&mut self, rect: &Rect) {
        for dy in 0..rect.size {
            for dx in 0..rect.size {
                self.put(rect.x + dx, rect.y + dy, rect.colour);
            }
        }
    }

    /// Integer Bresenham line-drawing algorithm.
    fn draw_line(&mut self, line: &Line) {
        let (mut x0, mut y0) = line.from;
        let (x1, y1) = line.to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x0, y0, line.colour);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                if x0 == x1 {
                    break;
                }
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                if y0 == y1 {
                    break;
                }
                err += dx;
                y0 += sy;
            }
        }
    }

    fn draw_fullscreen(&mut self, program: &dyn FragmentProgram) {
        let env = ShaderEnv {
            uniforms: &self.uniforms,
            volume: self.volume.as_ref(),
        };
        let h = self.height;
        for (row, line) in self.scratch.chunks_exact_mut(self.width.max(1)).enumerate() {
            let frag_y = (h - 1 - row) as f32 + 0.5;
            for (x, px) in line.iter_mut().enumerate() {
                *px = pack(program.shade(Vec2::new(x as f32 + 0.5, frag_y), &env));
            }
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.uniforms.set(name, Uniform::Float(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.uniforms.set(name, Uniform::Vec2(value));
    }

    fn upload_volume(
        &mut self,
        width: u32,
        height: u32,
        depth: u32,
        bytes: &[u8],
    ) -> Result<(), RenderError> {
        let volume = VoxelVolume::from_bytes(width, height, depth, bytes)?;
        debug!(width, height, depth, "volume uploaded");
        self.volume = Some(volume);
        Ok(())
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCall, RendererExt};
    use crate::world::GridError;
    use glam::Vec3;

    const RED: Rgba = 0x00_FF0000;

    #[test]
    fn column_is_centred_and_clipped() {
        let mut sw = Software::default();
        sw.begin_frame(4, 10);
        sw.draw_column(&ColumnSpan {
            x: 1,
            height: 4,
            colour: RED,
        });
        let lit: Vec<usize> = (0..10).filter(|&y| sw.pixel(1, y) == Some(RED)).collect();
        assert_eq!(lit, vec![3, 4, 5, 6]);

        // taller than the screen and off to the side: no panic
        sw.draw_column(&ColumnSpan {
            x: 2,
            height: 40,
            colour: RED,
        });
        sw.draw_column(&ColumnSpan {
            x: 9,
            height: 4,
            colour: RED,
        });
        assert!((0..10).all(|y| sw.pixel(2, y) == Some(RED)));
    }

    #[test]
    fn lines_and_rects_clip_at_edges() {
        let mut sw = Software::default();
        sw.begin_frame(8, 8);
        sw.draw_calls(&[
            DrawCall::Line(Line {
                from: (-5, 0),
                to: (20, 0),
                colour: RED,
            }),
            DrawCall::Rect(Rect {
                x: 6,
                y: 6,
                size: 5,
                colour: 0x00_00FF00,
            }),
        ]);
        assert!((0..8).all(|x| sw.pixel(x, 0) == Some(RED)));
        assert_eq!(sw.pixel(7, 7), Some(0x00_00FF00));
        assert_eq!(sw.pixel(5, 5), Some(0));
    }

    #[test]
    fn begin_frame_clears() {
        let mut sw = Software::with_clear(0x00_123456);
        sw.begin_frame(2, 2);
        sw.draw_rect(&Rect {
            x: 0,
            y: 0,
            size: 2,
            colour: RED,
        });
        sw.begin_frame(2, 2);
        let mut seen = Vec::new();
        sw.end_frame(|fb, w, h| seen.extend_from_slice(&[fb.len(), w, h]));
        assert_eq!(seen, vec![4, 2, 2]);
        assert_eq!(sw.pixel(1, 1), Some(0x00_123456));
    }

    struct Gradient;
    impl FragmentProgram for Gradient {
        fn shade(&self, frag: Vec2, env: &ShaderEnv<'_>) -> Vec3 {
            let res = env.uniforms.vec2("resolution").unwrap_or(Vec2::ONE);
            Vec3::new(frag.x / res.x, frag.y / res.y, 0.0)
        }
    }

    #[test]
    fn fullscreen_origin_is_bottom_left() {
        let mut sw = Software::default();
        sw.set_vec2("resolution", Vec2::new(2.0, 2.0));
        sw.begin_frame(2, 2);
        sw.draw_fullscreen(&Gradient);
        // top-left pixel: frag (0.5, 1.5)
        assert_eq!(sw.pixel(0, 0), Some(pack(Vec3::new(0.25, 0.75, 0.0))));
        // bottom-right pixel: frag (1.5, 0.5)
        assert_eq!(sw.pixel(1, 1), Some(pack(Vec3::new(0.75, 0.25, 0.0))));
    }

    #[test]
    fn volume_upload_checks_size() {
        let mut sw = Software::default();
        assert_eq!(
            sw.upload_volume(2, 2, 2, &[0; 5]),
            Err(RenderError::Volume(GridError::SizeMismatch {
                expected: 8,
                found: 5
            }))
        );
        assert!(sw.volume().is_none());
        sw.upload_volume(2, 2, 2, &[1; 8]).unwrap();
        assert_eq!(sw.volume().map(|v| v.dims()), Some((2, 2, 2)));
    }
}
