//! The [`SearchEngine`] — owned grid and run state, advanced one node
//! expansion per tick.

use gridpath_core::{Point, Range, Tile, TileGrid};

use crate::arena::{Node, NodeArena};
use crate::distance::heuristic;
use crate::error::EngineError;
use crate::frontier::{Frontier, Visited};
use crate::strategy::Strategy;

// ---------------------------------------------------------------------------
// GridConfig / StepReport
// ---------------------------------------------------------------------------

/// Grid dimensions and movement model.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Total grid width, border included.
    pub width: i32,
    /// Total grid height, border included.
    pub height: i32,
    /// Whether diagonal movement is allowed (8 neighbors instead of 4).
    pub diagonal: bool,
}

impl GridConfig {
    /// Create a new configuration.
    pub const fn new(width: i32, height: i32, diagonal: bool) -> Self {
        Self {
            width,
            height,
            diagonal,
        }
    }
}

impl Default for GridConfig {
    /// A 30×30 grid with diagonal movement, the interactive default.
    fn default() -> Self {
        Self::new(30, 30, true)
    }
}

/// Outcome of one [`SearchEngine::step`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepReport {
    /// A node was expanded; step again on a later tick.
    Continuing,
    /// The node removed this step is the goal. Terminal; reconstruct next.
    Success,
    /// The frontier was empty: no path exists. Terminal.
    Failure,
}

impl StepReport {
    /// Whether this report ends the run.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, StepReport::Success | StepReport::Failure)
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RunState {
    Running,
    Succeeded,
    Failed,
    Reconstructed,
}

/// The state of one search run: everything discarded on reset.
#[derive(Debug)]
struct Run {
    strategy: Strategy,
    arena: NodeArena,
    frontier: Frontier,
    visited: Visited,
    state: RunState,
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// The incremental grid-search engine.
///
/// Owns the tile grid, the endpoints and the active run. The host paints
/// walls and endpoints, calls [`begin_run`](Self::begin_run), then drives
/// [`step`](Self::step) once per tick until it reports a terminal result;
/// a [`Success`](StepReport::Success) is followed by one
/// [`reconstruct_path`](Self::reconstruct_path) call.
///
/// Single-threaded and tick-cooperative by design: every operation takes
/// `&mut self` and does a bounded amount of work.
#[derive(Debug)]
pub struct SearchEngine {
    grid: TileGrid,
    /// The usable interior: the grid minus its permanent border wall.
    interior: Range,
    start: Option<Point>,
    end: Option<Point>,
    diagonal: bool,
    run: Option<Run>,
}

impl SearchEngine {
    /// Build an engine with a bordered, all-open grid and no endpoints.
    ///
    /// Dimensions must leave at least one interior cell (3×3).
    pub fn new(config: GridConfig) -> Result<Self, EngineError> {
        if config.width < 3 || config.height < 3 {
            return Err(EngineError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        let mut grid = TileGrid::new(config.width, config.height);
        let interior = grid.bounds().shift(1, 1, -1, -1);
        for p in grid.bounds().iter() {
            if !interior.contains(p) {
                grid.set(p, Tile::Wall);
            }
        }
        Ok(Self {
            grid,
            interior,
            start: None,
            end: None,
            diagonal: config.diagonal,
            run: None,
        })
    }

    /// Re-fix dimensions and movement model.
    ///
    /// Discards the grid contents, both endpoints and any in-progress run.
    pub fn configure(&mut self, config: GridConfig) -> Result<(), EngineError> {
        *self = Self::new(config)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Read-only view of the tile classifications, for rendering.
    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// The usable interior range (grid minus border wall).
    #[inline]
    pub fn interior(&self) -> Range {
        self.interior
    }

    /// The start cell, if placed.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The end cell, if placed.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Whether diagonal movement is allowed.
    #[inline]
    pub fn diagonal(&self) -> bool {
        self.diagonal
    }

    /// The active run's strategy, if a run exists.
    #[inline]
    pub fn strategy(&self) -> Option<Strategy> {
        self.run.as_ref().map(|r| r.strategy)
    }

    /// Coordinates expanded by the active run, in expansion order.
    ///
    /// Empty when no run exists. Useful for hosts that display search
    /// statistics next to the grid.
    pub fn visited_order(&self) -> impl Iterator<Item = Point> + '_ {
        self.run
            .iter()
            .flat_map(|r| r.visited.iter().map(move |i| r.arena.get(i).pos))
    }

    #[inline]
    fn ensure_interior(&self, p: Point) -> Result<(), EngineError> {
        if self.interior.contains(p) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds(p))
        }
    }

    // -----------------------------------------------------------------------
    // Grid editing
    // -----------------------------------------------------------------------

    /// Paint one interior cell.
    ///
    /// `Open` and `Wall` paint directly; `Start`/`End` delegate to the move
    /// operations; the search-owned classifications are rejected. Repainting
    /// the current start or end cell is rejected — endpoints only move
    /// through [`set_start`](Self::set_start) / [`set_end`](Self::set_end).
    pub fn set_tile(&mut self, p: Point, tile: Tile) -> Result<(), EngineError> {
        match tile {
            Tile::Start => self.set_start(p),
            Tile::End => self.set_end(p),
            Tile::Open | Tile::Wall => {
                self.ensure_interior(p)?;
                if self.start == Some(p) || self.end == Some(p) {
                    return Err(EngineError::ProtectedTile(p));
                }
                self.grid.set(p, tile);
                Ok(())
            }
            Tile::Frontier | Tile::Visited | Tile::FinalPath => {
                Err(EngineError::SearchOwnedTile(tile))
            }
        }
    }

    /// Place or move the start cell, reclaiming the old one as `Open`.
    ///
    /// Discards any in-progress run.
    pub fn set_start(&mut self, p: Point) -> Result<(), EngineError> {
        self.ensure_interior(p)?;
        if self.end == Some(p) {
            return Err(EngineError::ProtectedTile(p));
        }
        self.abandon_run();
        if let Some(old) = self.start {
            self.grid.set(old, Tile::Open);
        }
        self.grid.set(p, Tile::Start);
        self.start = Some(p);
        Ok(())
    }

    /// Place or move the end cell, reclaiming the old one as `Open`.
    ///
    /// Discards any in-progress run.
    pub fn set_end(&mut self, p: Point) -> Result<(), EngineError> {
        self.ensure_interior(p)?;
        if self.start == Some(p) {
            return Err(EngineError::ProtectedTile(p));
        }
        self.abandon_run();
        if let Some(old) = self.end {
            self.grid.set(old, Tile::Open);
        }
        self.grid.set(p, Tile::End);
        self.end = Some(p);
        Ok(())
    }

    /// Switch between orthogonal and diagonal movement.
    ///
    /// Changing the movement model discards any in-progress run.
    pub fn set_diagonal(&mut self, diagonal: bool) {
        if self.diagonal != diagonal {
            self.diagonal = diagonal;
            self.abandon_run();
        }
    }

    // -----------------------------------------------------------------------
    // Run lifecycle
    // -----------------------------------------------------------------------

    /// Start a new run: discard any prior run and its grid coloring, then
    /// seed the frontier with the start node.
    pub fn begin_run(&mut self, strategy: Strategy) -> Result<(), EngineError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(EngineError::NoStartOrEnd);
        };
        self.abandon_run();
        self.run = Some(Run {
            strategy,
            arena: NodeArena::with_start(start),
            frontier: Frontier::seeded_with(0),
            visited: Visited::default(),
            state: RunState::Running,
        });
        log::debug!(
            "run started: {strategy} from {start} to {end}, diagonal={}",
            self.diagonal
        );
        Ok(())
    }

    /// Advance the active run by exactly one node expansion.
    pub fn step(&mut self) -> Result<StepReport, EngineError> {
        let diagonal = self.diagonal;
        let Some(end) = self.end else {
            return Err(EngineError::InvalidRunState("no active run"));
        };
        let Some(run) = self.run.as_mut() else {
            return Err(EngineError::InvalidRunState("no active run"));
        };
        if run.state != RunState::Running {
            return Err(EngineError::InvalidRunState("run already finished"));
        }

        // Remove the next node under the strategy's discipline. An empty
        // frontier means the search space is exhausted.
        let removed = match run.strategy {
            Strategy::Dfs => run.frontier.pop_back(),
            Strategy::Bfs => run.frontier.pop_front(),
            Strategy::Greedy => run.frontier.remove_min_by_key(&run.arena, |n| n.h),
            Strategy::AStar => run.frontier.remove_min_by_key(&run.arena, Node::f),
        };
        let Some(ci) = removed else {
            run.state = RunState::Failed;
            log::debug!(
                "run failed: frontier exhausted after {} expansions",
                run.visited.len()
            );
            return Ok(StepReport::Failure);
        };

        let cur = *run.arena.get(ci);
        run.visited.push(ci);
        // Endpoints keep their markers; everything else shows as expanded.
        if self.grid.at(cur.pos).is_some_and(|t| !t.is_endpoint()) {
            self.grid.set(cur.pos, Tile::Visited);
        }

        if cur.pos == end {
            run.state = RunState::Succeeded;
            log::debug!(
                "run succeeded: goal reached after {} expansions ({} nodes discovered)",
                run.visited.len(),
                run.arena.len()
            );
            return Ok(StepReport::Success);
        }

        // neighbors8 lists the cardinals first, so orthogonal movement is a
        // prefix of the diagonal neighborhood.
        let all = cur.pos.neighbors8();
        let neighbors = if diagonal { &all[..] } else { &all[..4] };

        for &np in neighbors {
            // The border wall keeps expansions inside the grid, but the
            // lookup is checked rather than assumed.
            let Some(tile) = self.grid.at(np) else { continue };
            if !tile.is_passable() || run.visited.contains(np, &run.arena) {
                continue;
            }

            match run.strategy {
                Strategy::Dfs | Strategy::Bfs | Strategy::Greedy => {
                    // First discoverer wins; duplicates are dropped.
                    if run.frontier.contains(np, &run.arena) {
                        continue;
                    }
                    let h = if run.strategy.uses_heuristic() {
                        heuristic(np, end, diagonal)
                    } else {
                        0
                    };
                    let idx = run.arena.push(Node {
                        pos: np,
                        parent: Some(ci),
                        g: 0,
                        h,
                    });
                    run.frontier.push(idx);
                    if !tile.is_endpoint() {
                        self.grid.set(np, Tile::Frontier);
                    }
                }
                Strategy::AStar => {
                    // Unit edge weight regardless of direction.
                    let g = cur.g + 1;
                    let h = heuristic(np, end, diagonal);
                    if let Some(existing) = run.frontier.find(np, &run.arena) {
                        // A strictly better route to a queued coordinate
                        // rewrites that entry in place, keeping its queue
                        // position. Visited coordinates are never reopened.
                        if g < run.arena.get(existing).g {
                            *run.arena.get_mut(existing) = Node {
                                pos: np,
                                parent: Some(ci),
                                g,
                                h,
                            };
                        }
                    } else {
                        let idx = run.arena.push(Node {
                            pos: np,
                            parent: Some(ci),
                            g,
                            h,
                        });
                        run.frontier.push(idx);
                        if !tile.is_endpoint() {
                            self.grid.set(np, Tile::Frontier);
                        }
                    }
                }
            }
        }

        log::trace!(
            "expanded {} ({} queued, {} visited)",
            cur.pos,
            run.frontier.len(),
            run.visited.len()
        );
        Ok(StepReport::Continuing)
    }

    /// Walk the discoverer chain of a successful run from the goal back to
    /// the start, coloring the route and returning it start-to-end.
    ///
    /// Valid exactly once, immediately after a [`StepReport::Success`].
    pub fn reconstruct_path(&mut self) -> Result<Vec<Point>, EngineError> {
        let Some(run) = self.run.as_mut() else {
            return Err(EngineError::InvalidRunState("no active run"));
        };
        if run.state != RunState::Succeeded {
            return Err(EngineError::InvalidRunState(
                "reconstruction requires a success",
            ));
        }
        let Some(goal) = run.visited.last() else {
            return Err(EngineError::InvalidRunState(
                "reconstruction requires a success",
            ));
        };

        let mut path = Vec::new();
        let mut next = Some(goal);
        while let Some(i) = next {
            let node = run.arena.get(i);
            path.push(node.pos);
            next = node.parent;
        }
        path.reverse();

        for &p in &path {
            if Some(p) != self.start && Some(p) != self.end {
                self.grid.set(p, Tile::FinalPath);
            }
        }
        // The grid must never be left without visible endpoint markers.
        if let Some(s) = self.start {
            self.grid.set(s, Tile::Start);
        }
        if let Some(e) = self.end {
            self.grid.set(e, Tile::End);
        }

        run.state = RunState::Reconstructed;
        log::debug!("path reconstructed: {} steps", path.len() - 1);
        Ok(path)
    }

    /// Abandon any run and clear its grid coloring, keeping walls and
    /// endpoints.
    pub fn reset(&mut self) {
        self.abandon_run();
    }

    /// [`reset`](Self::reset), plus erase all painted walls. The border
    /// stays.
    pub fn clear(&mut self) {
        self.run = None;
        for p in self.interior.iter() {
            self.grid.set(p, Tile::Open);
        }
        self.reassert_endpoints();
    }

    fn abandon_run(&mut self) {
        self.run = None;
        for p in self.interior.iter() {
            if self.grid.at(p).is_some_and(Tile::is_search_marking) {
                self.grid.set(p, Tile::Open);
            }
        }
        self.reassert_endpoints();
    }

    fn reassert_endpoints(&mut self) {
        if let Some(s) = self.start {
            self.grid.set(s, Tile::Start);
        }
        if let Some(e) = self.end {
            self.grid.set(e, Tile::End);
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn report_and_config_round_trip() {
        let json = serde_json::to_string(&StepReport::Success).unwrap();
        let back: StepReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StepReport::Success);

        let config = GridConfig::new(12, 9, true);
        let json = serde_json::to_string(&config).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
