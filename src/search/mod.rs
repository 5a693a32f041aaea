//! Bounded lookahead strategies for choosing the next move.
//!
//! Three strategies share the [`Strategy`] surface:
//! - [`BreadthBounded`]: every move sequence up to the depth bound, FIFO order.
//! - [`DepthBounded`]: recursive search keeping the best descendant score.
//! - [`BestFirst`]: priority-ordered frontier keyed by a [`Heuristic`].
//!
//! Searches are pure with respect to their inputs: they take a board and
//! score by value, expand private copies through [`engine::apply_move`], and
//! hand back one move. Spawns never happen during planning, so every strategy
//! is deterministic for a given board and score.
//!
//! ```
//! use lookahead_2048::engine::{Board, Move};
//! use lookahead_2048::search::{BestFirst, BreadthBounded, DepthBounded, Heuristic, Strategy};
//!
//! let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
//! assert_eq!(BreadthBounded::new().best_move(b, 0), Some(Move::Left));
//! assert_eq!(DepthBounded::new().best_move(b, 0), Some(Move::Left));
//! assert!(BestFirst::new(Heuristic::Clustering).best_move(b, 0).is_some());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::engine::{self, Board, Move, Score};
use crate::error::Error;

mod best_first;
mod breadth;
mod depth;
mod heuristic;

pub use best_first::BestFirst;
pub use breadth::BreadthBounded;
pub use depth::DepthBounded;
pub use heuristic::{Heuristic, Priority};

/// Plies explored before a node counts as a leaf.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Configurable knobs shared by all strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Sequence length at which expansion stops.
    pub max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self { Self { max_depth: DEFAULT_MAX_DEPTH } }
}

/// Basic search stats for a single decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the frontier (or recursive calls made).
    pub nodes: u64,
    /// Nodes evaluated as leaves.
    pub leaves: u64,
}

/// Something that can propose the next move for a board.
pub trait Strategy {
    /// Report name, e.g. `"BFS"` or `"A* (clustering)"`.
    fn name(&self) -> String;

    /// Pick a move for `board`/`score`, or `None` when no explored line
    /// improves on `score`.
    fn best_move(&mut self, board: Board, score: Score) -> Option<Move>;

    /// Statistics collected from the last call to [`Strategy::best_move`].
    fn last_stats(&self) -> SearchStats;

    /// Zero the statistics reported by [`Strategy::last_stats`].
    fn reset_stats(&mut self);
}

/// The closed set of strategies a driver can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Bfs,
    Dfs,
    AStar(Heuristic),
}

impl StrategyKind {
    /// BFS, DFS, then best-first with every heuristic.
    pub fn all() -> Vec<StrategyKind> {
        let mut kinds = vec![StrategyKind::Bfs, StrategyKind::Dfs];
        kinds.extend(Heuristic::ALL.into_iter().map(StrategyKind::AStar));
        kinds
    }

    /// Attach a heuristic; only meaningful for best-first.
    pub fn with_heuristic(self, heuristic: Heuristic) -> Self {
        match self {
            StrategyKind::AStar(_) => StrategyKind::AStar(heuristic),
            other => other,
        }
    }

    pub fn build(self, cfg: SearchConfig) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Bfs => Box::new(BreadthBounded::with_config(cfg)),
            StrategyKind::Dfs => Box::new(DepthBounded::with_config(cfg)),
            StrategyKind::AStar(h) => Box::new(BestFirst::with_config(h, cfg)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Bfs => f.write_str("BFS"),
            StrategyKind::Dfs => f.write_str("DFS"),
            StrategyKind::AStar(h) => write!(f, "A* ({h})"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    /// Accepts `bfs`, `dfs` and `astar`; best-first starts on the default heuristic.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(StrategyKind::Bfs),
            "dfs" => Ok(StrategyKind::Dfs),
            "astar" | "a*" => Ok(StrategyKind::AStar(Heuristic::default())),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

/// Frontier entry shared by the breadth and best-first searches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Node {
    board: Board,
    score: Score,
    path: Vec<Move>,
}

impl Node {
    fn root(board: Board, score: Score) -> Self { Node { board, score, path: Vec::new() } }

    /// Children for every move that changes the board, in `Move::ALL` order.
    fn children(&self) -> impl Iterator<Item = Node> + '_ {
        Move::ALL.into_iter().filter_map(move |dir| {
            let next = engine::apply_move(self.board, self.score, dir);
            next.changed.then(|| {
                let mut path = Vec::with_capacity(self.path.len() + 1);
                path.extend_from_slice(&self.path);
                path.push(dir);
                Node { board: next.board, score: next.score, path }
            })
        })
    }
}

/// Best leaf seen so far; only a strictly higher score replaces it.
#[derive(Debug)]
struct BestLeaf {
    score: Score,
    path: Vec<Move>,
}

impl BestLeaf {
    fn new(baseline: Score) -> Self { BestLeaf { score: baseline, path: Vec::new() } }

    fn offer(&mut self, node: Node) {
        if node.score > self.score {
            self.score = node.score;
            self.path = node.path;
        }
    }

    fn first_move(&self) -> Option<Move> { self.path.first().copied() }
}
