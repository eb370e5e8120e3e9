//! 2-D tile map queried by the column caster.
//!
//! Tiles are `u8` codes in row-major order: `0` is open floor, anything else
//! is a wall whose code also picks its colour.

use glam::IVec2;
use thiserror::Error;

/// Tile code for an open, walkable cell.
pub const EMPTY: u8 = 0;

/// Value `TileMap::get` answers for coordinates outside the map.
pub const OUT_OF_BOUNDS: i32 = -1;

/// What a grid query found.
///
/// Shared by the 2-D and 3-D grids so callers decide once how a ray leaving
/// the world is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    Empty,
    Solid(u8),
    OutOfBounds,
}

impl Occupancy {
    /// Anything that is not open space stops a ray.
    #[inline]
    pub fn blocks(self) -> bool {
        !matches!(self, Occupancy::Empty)
    }

    /// Classify a raw stored value.
    #[inline]
    pub fn from_code(code: u8) -> Self {
        if code == EMPTY {
            Occupancy::Empty
        } else {
            Occupancy::Solid(code)
        }
    }
}

/// Things that can go wrong while building a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("grid dimensions overflow the address space")]
    TooLarge,

    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("expected {expected} bytes for the volume, got {found}")]
    SizeMismatch { expected: usize, found: usize },
}

/// Occupancy oracle for the 2-D caster.
pub trait TileGrid {
    fn probe(&self, cell: IVec2) -> Occupancy;
}

/// Fixed-size rectangular tile map.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<u8>,
}

impl TileMap {
    /// All-empty map of `width × height` tiles.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        let len = width.checked_mul(height).ok_or(GridError::TooLarge)?;
        Ok(Self {
            width,
            height,
            tiles: vec![EMPTY; len],
        })
    }

    /// Build from literal rows (`rows[y][x]`).
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut map = Self::new(width, rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    found: row.len(),
                    expected: width,
                });
            }
            map.tiles[y * width..(y + 1) * width].copy_from_slice(row);
        }
        Ok(map)
    }

    /// Empty interior enclosed by a one-tile border of `code`.
    pub fn bordered(width: usize, height: usize, code: u8) -> Result<Self, GridError> {
        let mut map = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    map.tiles[y * width + x] = code;
                }
            }
        }
        Ok(map)
    }

    /// The 10×10 walled arena the CPU demo ships with.
    pub fn sample_arena() -> Self {
        const ARENA: [[u8; 10]; 10] = [
            [1, 1, 1, 2, 3, 4, 2, 1, 1, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 5],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 5],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 6],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 5],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 5],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 1, 5, 2, 3, 4, 2, 1, 1, 1],
        ];
        Self {
            width: 10,
            height: 10,
            tiles: ARENA.iter().flatten().copied().collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let in_x = (0..self.width as i32).contains(&x);
        let in_y = (0..self.height as i32).contains(&y);
        (in_x && in_y).then(|| y as usize * self.width + x as usize)
    }

    /// Tile code at `(x, y)`, or [`OUT_OF_BOUNDS`] outside the map.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> i32 {
        self.index(x, y)
            .map_or(OUT_OF_BOUNDS, |i| self.tiles[i] as i32)
    }

    /// Overwrite one tile. Writes outside the map are ignored.
    pub fn set(&mut self, x: i32, y: i32, code: u8) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = code;
        }
    }
}

impl TileGrid for TileMap {
    #[inline]
    fn probe(&self, cell: IVec2) -> Occupancy {
        self.index(cell.x, cell.y)
            .map_or(Occupancy::OutOfBounds, |i| Occupancy::from_code(self.tiles[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_queries_return_sentinel() {
        let map = TileMap::sample_arena();
        assert_eq!(map.get(-1, 0), OUT_OF_BOUNDS);
        assert_eq!(map.get(0, 10), OUT_OF_BOUNDS);
        assert_eq!(map.get(10, 3), OUT_OF_BOUNDS);
        assert_eq!(map.probe(IVec2::new(4, -2)), Occupancy::OutOfBounds);
    }

    #[test]
    fn sample_arena_layout() {
        let map = TileMap::sample_arena();
        assert_eq!((map.width(), map.height()), (10, 10));
        assert_eq!(map.get(3, 0), 2);
        assert_eq!(map.get(9, 4), 6);
        assert_eq!(map.get(5, 5), 0);
        assert_eq!(map.probe(IVec2::new(9, 2)), Occupancy::Solid(5));
        assert_eq!(map.probe(IVec2::new(4, 4)), Occupancy::Empty);
    }

    #[test]
    fn queries_are_repeatable() {
        let map = TileMap::sample_arena();
        for y in -1..11 {
            for x in -1..11 {
                let a = map.get(x, y);
                assert_eq!(a, map.get(x, y));
                assert_eq!(map.probe(IVec2::new(x, y)), map.probe(IVec2::new(x, y)));
            }
        }
    }

    #[test]
    fn bordered_map_is_enclosed() {
        let map = TileMap::bordered(6, 4, 1).unwrap();
        assert_eq!(map.get(0, 2), 1);
        assert_eq!(map.get(5, 2), 1);
        assert_eq!(map.get(3, 0), 1);
        assert_eq!(map.get(3, 3), 1);
        assert_eq!(map.get(2, 1), 0);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!(TileMap::new(0, 3), Err(GridError::Empty));
        let rows: [&[u8]; 2] = [&[1, 1, 1], &[1, 0]];
        assert_eq!(
            TileMap::from_rows(&rows),
            Err(GridError::RaggedRow {
                row: 1,
                found: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn oversized_map_is_an_error() {
        assert_eq!(TileMap::new(usize::MAX, 2), Err(GridError::TooLarge));
    }

    #[test]
    fn set_ignores_outside_writes() {
        let mut map = TileMap::new(2, 2).unwrap();
        map.set(1, 1, 4);
        map.set(5, 5, 4);
        assert_eq!(map.get(1, 1), 4);
        assert_eq!(map.get(0, 0), 0);
    }
}
