//! The engine's error taxonomy.
//!
//! All variants are recoverable caller-contract violations; a search that
//! exhausts its frontier reports [`StepReport::Failure`](crate::StepReport)
//! as a normal outcome, never an error.

use std::fmt;

use gridpath_core::{Point, Tile};

/// Errors reported by [`SearchEngine`](crate::SearchEngine) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate outside the usable interior (the grid minus its permanent
    /// border wall).
    OutOfBounds(Point),
    /// An operation was invoked in a run state that does not permit it:
    /// stepping a finished or absent run, or reconstructing without an
    /// immediately preceding success.
    InvalidRunState(&'static str),
    /// A run was requested before both endpoints were placed.
    NoStartOrEnd,
    /// An attempt to repaint the current start or end cell; endpoints only
    /// move through the explicit move operations.
    ProtectedTile(Point),
    /// A search-owned classification was used as a paint value.
    SearchOwnedTile(Tile),
    /// Grid dimensions too small to hold a border and a usable interior.
    InvalidDimensions { width: i32, height: i32 },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "coordinate {p} is outside the grid interior"),
            Self::InvalidRunState(what) => write!(f, "invalid run state: {what}"),
            Self::NoStartOrEnd => {
                write!(f, "start and end tiles must be placed before a run begins")
            }
            Self::ProtectedTile(p) => {
                write!(f, "tile at {p} is an endpoint and cannot be repainted")
            }
            Self::SearchOwnedTile(tile) => {
                write!(f, "{tile} tiles are search output and cannot be painted")
            }
            Self::InvalidDimensions { width, height } => {
                write!(f, "{width}x{height} grid leaves no usable interior")
            }
        }
    }
}

impl std::error::Error for EngineError {}
