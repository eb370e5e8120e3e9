//! Column wall pass and the top-down minimap overlay.
//!
//! Both produce [`DrawCall`]s; nothing here touches pixels.

use glam::Vec2;

use crate::{
    engine::{
        dda::{Axis, MAX_STEPS_2D, Trace, cast_2d},
        projection::column_ray,
    },
    renderer::{ColumnSpan, DrawCall, Line, Rect, Rgba, darken},
    world::{Camera, Occupancy, TileMap},
};

/// Walls crossed on the x-axis are drawn at this brightness.
pub const X_SIDE_SHADE: f32 = 0.9;

/// Colour for a blocking cell; `None` for open space.
pub fn tile_colour(occ: Occupancy) -> Option<Rgba> {
    let c = match occ {
        Occupancy::Empty => return None,
        Occupancy::OutOfBounds => 0xFFFF00,
        Occupancy::Solid(1) => 0xFFFFFF,
        Occupancy::Solid(2) => 0xFF0000,
        Occupancy::Solid(3) => 0x00FF00,
        Occupancy::Solid(4) => 0x0000FF,
        Occupancy::Solid(5) => 0xFF00FF,
        Occupancy::Solid(6) => 0x444444,
        Occupancy::Solid(_) => 0x888888,
    };
    Some(c)
}

/// Screen geometry shared by both passes.
#[derive(Clone, Copy, Debug)]
pub struct View {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
}

/// Cast one ray per screen column and append a wall slice for every hit.
///
/// Slice height is `height / perp_distance`, capped at the screen height.
/// Columns whose ray runs out of steps stay background.
pub fn cast_columns(map: &TileMap, cam: &Camera, view: View, out: &mut Vec<DrawCall>) {
    let origin = cam.grid_origin(view.tile_size);
    let full = view.height as f32;

    for x in 0..view.width {
        let ray = column_ray(cam, x, view.width);
        let Trace::Hit(hit) = cast_2d(origin, ray.dir, map, MAX_STEPS_2D) else {
            continue;
        };
        let Some(base) = tile_colour(hit.occupancy) else {
            continue;
        };
        let colour = if hit.crossed(Axis::X) {
            darken(base, X_SIDE_SHADE)
        } else {
            base
        };
        let height = (full / hit.perp_distance.abs()).min(full);
        out.push(DrawCall::Column(ColumnSpan {
            x: x as i32,
            height: height as i32,
            colour,
        }));
    }
}

const MAP_OFFSET: i32 = 5;
const MAP_SCALE: i32 = 5;
const PLAYER_COLOUR: Rgba = 0xAAAAAA;
const FOV_COLOUR: Rgba = 0x00AA00;
const HEADING_COLOUR: Rgba = 0xFF0000;
const FOV_LEN: f32 = 100.0;
const HEADING_LEN: f32 = 5.0;

/// Top-down overlay in the upper-left corner: tiles, player marker, the two
/// edges of the field of view and a short heading tick.
pub fn minimap(map: &TileMap, cam: &Camera, view: View, out: &mut Vec<DrawCall>) {
    for y in 0..map.height() as i32 {
        for x in 0..map.width() as i32 {
            let code = map.get(x, y);
            if code == 0 {
                continue;
            }
            if let Some(colour) = tile_colour(Occupancy::from_code(code as u8)) {
                out.push(DrawCall::Rect(Rect {
                    x: MAP_OFFSET + x * MAP_SCALE,
                    y: MAP_OFFSET + y * MAP_SCALE,
                    size: MAP_SCALE,
                    colour,
                }));
            }
        }
    }

    let p = Vec2::splat(MAP_OFFSET as f32) + cam.grid_origin(view.tile_size) * MAP_SCALE as f32;
    let centre = (p.x as i32, p.y as i32);
    out.push(DrawCall::Rect(Rect {
        x: centre.0 - 1,
        y: centre.1 - 1,
        size: 3,
        colour: PLAYER_COLOUR,
    }));

    let ray_end = |angle: f32, len: f32| {
        let (s, c) = angle.to_radians().sin_cos();
        ((p.x + len * c).round() as i32, (p.y + len * s).round() as i32)
    };
    for edge in [cam.yaw - cam.fov, cam.yaw + cam.fov] {
        out.push(DrawCall::Line(Line {
            from: centre,
            to: ray_end(edge, FOV_LEN),
            colour: FOV_COLOUR,
        }));
    }
    out.push(DrawCall::Line(Line {
        from: centre,
        to: ray_end(cam.yaw, HEADING_LEN),
        colour: HEADING_COLOUR,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    const VIEW: View = View {
        width: 80,
        height: 60,
        tile_size: 10.0,
    };

    fn columns(map: &TileMap, cam: &Camera) -> Vec<ColumnSpan> {
        let mut calls = Vec::new();
        cast_columns(map, cam, VIEW, &mut calls);
        calls
            .into_iter()
            .map(|c| match c {
                DrawCall::Column(s) => s,
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    #[test]
    fn every_column_hits_in_closed_arena() {
        let map = TileMap::sample_arena();
        let cam = Camera::new(vec2(30.0, 40.0), 0.0, 60.0);
        let cols = columns(&map, &cam);
        assert_eq!(cols.len(), VIEW.width);
        assert!(cols.iter().all(|c| c.height > 0 && c.height <= 60));
    }

    #[test]
    fn centre_column_shades_x_walls() {
        let map = TileMap::bordered(10, 10, 1).unwrap();
        let cam = Camera::new(vec2(55.0, 55.0), 0.0, 60.0);
        let cols = columns(&map, &cam);
        let mid = cols.iter().find(|c| c.x == 40).unwrap();
        assert_eq!(mid.colour, darken(0xFFFFFF, X_SIDE_SHADE));
        // 60 / 3.5
        assert_eq!(mid.height, 17);

        let cam = Camera::new(vec2(55.0, 55.0), 90.0, 60.0);
        let cols = columns(&map, &cam);
        let mid = cols.iter().find(|c| c.x == 40).unwrap();
        assert_eq!(mid.colour, 0xFFFFFF);
    }

    #[test]
    fn hugging_a_wall_caps_height() {
        let map = TileMap::bordered(10, 10, 1).unwrap();
        let cam = Camera::new(vec2(89.9, 55.0), 0.0, 60.0);
        let cols = columns(&map, &cam);
        let mid = cols.iter().find(|c| c.x == 40).unwrap();
        assert_eq!(mid.height, 60);
    }

    #[test]
    fn open_map_edges_render_yellow() {
        let map = TileMap::new(4, 4).unwrap();
        let cam = Camera::new(vec2(20.0, 20.0), 0.0, 30.0);
        let cols = columns(&map, &cam);
        assert!(cols.iter().all(|c| c.colour == 0xFFFF00 || c.colour == darken(0xFFFF00, X_SIDE_SHADE)));
    }

    #[test]
    fn minimap_draws_walls_player_and_rays() {
        let map = TileMap::sample_arena();
        let cam = Camera::new(vec2(30.0, 40.0), 0.0, 60.0);
        let mut calls = Vec::new();
        minimap(&map, &cam, VIEW, &mut calls);

        let rects = calls.iter().filter(|c| matches!(c, DrawCall::Rect(_))).count();
        // 36 border tiles + player marker
        assert_eq!(rects, 37);
        let lines: Vec<&Line> = calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Line(l) => Some(l),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.from == (20, 25)));
        assert_eq!(lines[2].to, (25, 25));
        assert_eq!(lines[2].colour, HEADING_COLOUR);
    }
}
