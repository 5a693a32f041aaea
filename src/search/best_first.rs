use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;

use crate::engine::{Board, Move, Score};

use super::heuristic::{Heuristic, Priority};
use super::{BestLeaf, Node, SearchConfig, SearchStats, Strategy};

/// Best-first search: the frontier pops the lowest heuristic value first.
///
/// Ties fall through to board contents, score and move sequence, so the pop
/// order (and the chosen move) is fully deterministic.
#[derive(Debug)]
pub struct BestFirst {
    heuristic: Heuristic,
    cfg: SearchConfig,
    stats: SearchStats,
}

impl BestFirst {
    pub fn new(heuristic: Heuristic) -> Self { Self::with_config(heuristic, SearchConfig::default()) }

    pub fn with_config(heuristic: Heuristic, cfg: SearchConfig) -> Self {
        Self { heuristic, cfg, stats: SearchStats::default() }
    }

    /// Resolve a heuristic by name, falling back to empty tiles when unknown.
    pub fn from_selector(name: &str) -> Self { Self::new(Heuristic::from_selector(name)) }

    #[inline]
    pub fn heuristic(&self) -> Heuristic { self.heuristic }

    fn entry(&self, node: Node) -> Reverse<(Priority, Node)> {
        Reverse((self.heuristic.evaluate(&node.board), node))
    }

    fn search(&mut self, board: Board, score: Score) -> Option<Move> {
        let mut stats = SearchStats::default();
        let mut best = BestLeaf::new(score);
        let mut frontier = BinaryHeap::new();
        frontier.push(self.entry(Node::root(board, score)));
        while let Some(Reverse((_, node))) = frontier.pop() {
            stats.nodes += 1;
            if node.path.len() >= self.cfg.max_depth {
                stats.leaves += 1;
                best.offer(node);
                continue;
            }
            for child in node.children() {
                frontier.push(self.entry(child));
            }
        }
        self.stats = stats;
        best.first_move()
    }
}

impl Default for BestFirst {
    fn default() -> Self { Self::new(Heuristic::default()) }
}

impl Strategy for BestFirst {
    fn name(&self) -> String { format!("A* ({})", self.heuristic) }

    fn best_move(&mut self, board: Board, score: Score) -> Option<Move> {
        let choice = self.search(board, score);
        debug!(
            "astar[{}]: nodes={} leaves={} choice={:?}",
            self.heuristic, self.stats.nodes, self.stats.leaves, choice
        );
        choice
    }

    fn last_stats(&self) -> SearchStats { self.stats }

    fn reset_stats(&mut self) { self.stats = SearchStats::default() }
}
