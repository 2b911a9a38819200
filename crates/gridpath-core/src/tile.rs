//! The [`Tile`] type — the classification of one grid cell.

use std::fmt;

/// Classification of a single grid cell.
///
/// `Start` and `End` are endpoint markers: a search never recolors them with
/// `Frontier`/`Visited`/`FinalPath`, and painting over them is rejected by
/// the engine. `Frontier`, `Visited` and `FinalPath` are search output,
/// written only by an active run and its reconstructor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    /// Unvisited, traversable cell.
    #[default]
    Open,
    /// Impassable cell.
    Wall,
    /// The search origin.
    Start,
    /// The search goal.
    End,
    /// Queued for expansion by the active run.
    Frontier,
    /// Expanded by the active run.
    Visited,
    /// On the reconstructed route.
    FinalPath,
}

impl Tile {
    /// Whether a search may move through this cell.
    ///
    /// Everything except `Wall` is traversable — search markings left from
    /// the current run are still part of the walkable surface.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Tile::Wall)
    }

    /// Whether this classification is written by a search run
    /// (`Frontier`/`Visited`/`FinalPath`).
    #[inline]
    pub const fn is_search_marking(self) -> bool {
        matches!(self, Tile::Frontier | Tile::Visited | Tile::FinalPath)
    }

    /// Whether this is one of the two endpoint markers.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Tile::Start | Tile::End)
    }

    /// The ASCII rune used by [`TileGrid`](crate::TileGrid) parsing and
    /// rendering.
    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Tile::Open => '.',
            Tile::Wall => '#',
            Tile::Start => 'S',
            Tile::End => 'E',
            Tile::Frontier => 'o',
            Tile::Visited => 'x',
            Tile::FinalPath => '*',
        }
    }

    /// Inverse of [`as_char`](Self::as_char). Returns `None` for runes
    /// outside the alphabet.
    #[inline]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Tile::Open),
            '#' => Some(Tile::Wall),
            'S' => Some(Tile::Start),
            'E' => Some(Tile::End),
            'o' => Some(Tile::Frontier),
            'x' => Some(Tile::Visited),
            '*' => Some(Tile::FinalPath),
            _ => None,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tile::Open => "open",
            Tile::Wall => "wall",
            Tile::Start => "start",
            Tile::End => "end",
            Tile::Frontier => "frontier",
            Tile::Visited => "visited",
            Tile::FinalPath => "final path",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passability() {
        assert!(Tile::Open.is_passable());
        assert!(Tile::Frontier.is_passable());
        assert!(Tile::Visited.is_passable());
        assert!(Tile::Start.is_passable());
        assert!(Tile::End.is_passable());
        assert!(!Tile::Wall.is_passable());
    }

    #[test]
    fn char_round_trip() {
        for tile in [
            Tile::Open,
            Tile::Wall,
            Tile::Start,
            Tile::End,
            Tile::Frontier,
            Tile::Visited,
            Tile::FinalPath,
        ] {
            assert_eq!(Tile::from_char(tile.as_char()), Some(tile));
        }
        assert_eq!(Tile::from_char('?'), None);
    }

    #[test]
    fn classification_groups() {
        assert!(Tile::Frontier.is_search_marking());
        assert!(Tile::Visited.is_search_marking());
        assert!(Tile::FinalPath.is_search_marking());
        assert!(!Tile::Open.is_search_marking());
        assert!(Tile::Start.is_endpoint());
        assert!(Tile::End.is_endpoint());
        assert!(!Tile::Wall.is_endpoint());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn tile_round_trip() {
        let json = serde_json::to_string(&Tile::FinalPath).unwrap();
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Tile::FinalPath);
    }
}
