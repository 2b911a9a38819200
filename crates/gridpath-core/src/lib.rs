//! **gridpath-core** — Tile grid and geometry primitives for incremental
//! grid search.
//!
//! This crate provides the foundational types shared by the *gridpath*
//! ecosystem: integer geometry primitives, the tile classification enum, and
//! an owned dense tile grid with ASCII parse/render support for fixtures and
//! renderers.

pub mod geom;
pub mod grid;
pub mod tile;

pub use geom::{Point, Range};
pub use grid::{ParseGridError, TileGrid};
pub use tile::Tile;
