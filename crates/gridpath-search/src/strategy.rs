//! The [`Strategy`] type — which of the four search disciplines a run uses.

use std::fmt;
use std::str::FromStr;

/// One of the four interchangeable search strategies.
///
/// The strategy governs only the frontier removal rule and which cost fields
/// are computed on admission; grid handling, visited bookkeeping and path
/// reconstruction are shared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Depth-first: expand the most recently discovered node.
    Dfs,
    /// Breadth-first: expand the least recently discovered node.
    Bfs,
    /// Greedy best-first: expand the node with the lowest heuristic.
    Greedy,
    /// A*: expand the node with the lowest `g + h`.
    AStar,
}

impl Strategy {
    /// Whether admission computes the heuristic estimate.
    #[inline]
    pub const fn uses_heuristic(self) -> bool {
        matches!(self, Strategy::Greedy | Strategy::AStar)
    }

    /// Whether admission tracks the exact path cost from the start.
    #[inline]
    pub const fn tracks_path_cost(self) -> bool {
        matches!(self, Strategy::AStar)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Dfs => "DFS",
            Strategy::Bfs => "BFS",
            Strategy::Greedy => "Greedy",
            Strategy::AStar => "A*",
        })
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" => Ok(Strategy::Dfs),
            "bfs" => Ok(Strategy::Bfs),
            "greedy" => Ok(Strategy::Greedy),
            "a*" | "astar" => Ok(Strategy::AStar),
            _ => Err(ParseStrategyError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy \u{201c}{}\u{201d} (expected dfs, bfs, greedy or astar)",
            self.0
        )
    }
}

impl std::error::Error for ParseStrategyError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn strategy_round_trip() {
        let json = serde_json::to_string(&Strategy::AStar).unwrap();
        let back: Strategy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Strategy::AStar);
    }
}
