//! The [`TileGrid`] type — an owned dense 2D grid of [`Tile`]s.
//!
//! Unlike a shared-buffer render grid, a `TileGrid` is exclusively owned by
//! whoever mutates it; all writes go through `&mut self`.

use std::fmt;

use crate::geom::{Point, Range};
use crate::tile::Tile;

// ---------------------------------------------------------------------------
// TileGrid
// ---------------------------------------------------------------------------

/// A dense 2D grid of tile classifications with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a new grid of the given dimensions, filled with [`Tile::Open`].
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            width: w,
            height: h,
            tiles: vec![Tile::default(); (w as usize) * (h as usize)],
        }
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + (p.x as usize))
    }

    /// The tile at `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|i| self.tiles[i])
    }

    /// Set the tile at `p`. No-op if `p` is outside the grid.
    #[inline]
    pub fn set(&mut self, p: Point, tile: Tile) {
        if let Some(i) = self.index(p) {
            self.tiles[i] = tile;
        }
    }

    /// Fill every cell with `tile`.
    pub fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Row-major iterator over `(Point, Tile)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds().iter().map(|p| (p, self.tiles[(p.y as usize) * (self.width as usize) + (p.x as usize)]))
    }

    /// Parse a grid from an ASCII map, one row per line.
    ///
    /// The alphabet is the one produced by [`Tile::as_char`]: `.` open,
    /// `#` wall, `S` start, `E` end, `o` frontier, `x` visited, `*` final
    /// path. All lines must have the same width.
    pub fn from_ascii(map: &str) -> Result<Self, ParseGridError> {
        let mut width: Option<usize> = None;
        let mut tiles = Vec::new();
        let mut height = 0usize;

        for (row, line) in map.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let expected = *width.get_or_insert(line.chars().count());
            let found = line.chars().count();
            if found != expected {
                return Err(ParseGridError::RaggedLine {
                    line: row,
                    found,
                    expected,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let Some(tile) = Tile::from_char(ch) else {
                    return Err(ParseGridError::UnknownRune {
                        ch,
                        pos: Point::new(col as i32, row as i32),
                    });
                };
                tiles.push(tile);
            }
            height += 1;
        }

        let width = width.unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(ParseGridError::Empty);
        }

        Ok(Self {
            width: width as i32,
            height: height as i32,
            tiles,
        })
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let i = (y as usize) * (self.width as usize) + (x as usize);
                write!(f, "{}", self.tiles[i].as_char())?;
            }
            if y < self.height - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ParseGridError
// ---------------------------------------------------------------------------

/// Errors that can occur when parsing an ASCII map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    /// The map has no rows or no columns.
    Empty,
    /// A line's width differs from the first line's.
    RaggedLine {
        line: usize,
        found: usize,
        expected: usize,
    },
    /// A character outside the tile alphabet was found.
    UnknownRune { ch: char, pos: Point },
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid map is empty"),
            Self::RaggedLine {
                line,
                found,
                expected,
            } => write!(
                f,
                "grid map line {line} is {found} cells wide, expected {expected}"
            ),
            Self::UnknownRune { ch, pos } => {
                write!(f, "grid map contains unknown rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for ParseGridError {}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
#####
#S..#
#.#E#
#####";

    #[test]
    fn new_and_at() {
        let g = TileGrid::new(4, 3);
        assert_eq!(g.bounds(), Range::new(0, 0, 4, 3));
        assert_eq!(g.at(Point::new(0, 0)), Some(Tile::Open));
        assert_eq!(g.at(Point::new(4, 0)), None);
        assert_eq!(g.at(Point::new(-1, 0)), None);
    }

    #[test]
    fn set_and_get() {
        let mut g = TileGrid::new(4, 3);
        g.set(Point::new(2, 1), Tile::Wall);
        assert_eq!(g.at(Point::new(2, 1)), Some(Tile::Wall));
        // Out-of-bounds set is a no-op.
        g.set(Point::new(9, 9), Tile::Wall);
        assert_eq!(g.iter().filter(|&(_, t)| t == Tile::Wall).count(), 1);
    }

    #[test]
    fn fill_replaces_everything() {
        let mut g = TileGrid::new(3, 2);
        g.fill(Tile::Wall);
        assert!(g.iter().all(|(_, t)| t == Tile::Wall));
    }

    #[test]
    fn parse_map() {
        let g = TileGrid::from_ascii(MAP).unwrap();
        assert_eq!(g.width(), 5);
        assert_eq!(g.height(), 4);
        assert_eq!(g.at(Point::new(1, 1)), Some(Tile::Start));
        assert_eq!(g.at(Point::new(3, 2)), Some(Tile::End));
        assert_eq!(g.at(Point::new(2, 2)), Some(Tile::Wall));
        assert_eq!(g.at(Point::new(2, 1)), Some(Tile::Open));
    }

    #[test]
    fn parse_render_round_trip() {
        let g = TileGrid::from_ascii(MAP).unwrap();
        assert_eq!(g.to_string(), MAP);
    }

    #[test]
    fn parse_rejects_ragged_lines() {
        let err = TileGrid::from_ascii("###\n##").unwrap_err();
        assert_eq!(
            err,
            ParseGridError::RaggedLine {
                line: 1,
                found: 2,
                expected: 3,
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_rune() {
        let err = TileGrid::from_ascii("#?#").unwrap_err();
        assert_eq!(
            err,
            ParseGridError::UnknownRune {
                ch: '?',
                pos: Point::new(1, 0),
            }
        );
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(TileGrid::from_ascii(""), Err(ParseGridError::Empty));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = TileGrid::new(3, 3);
        g.set(Point::new(1, 1), Tile::Start);
        let json = serde_json::to_string(&g).unwrap();
        let back: TileGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
