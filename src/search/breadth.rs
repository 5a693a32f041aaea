use std::collections::VecDeque;

use log::debug;

use crate::engine::{Board, Move, Score};

use super::{BestLeaf, Node, SearchConfig, SearchStats, Strategy};

/// Exhaustive breadth-first search over move sequences up to the depth bound.
///
/// Children are queued in `Move::ALL` order, so of two leaves with the same
/// score the one reached through the earlier move wins.
#[derive(Debug, Default)]
pub struct BreadthBounded {
    cfg: SearchConfig,
    stats: SearchStats,
}

impl BreadthBounded {
    pub fn new() -> Self { Self::with_config(SearchConfig::default()) }

    pub fn with_config(cfg: SearchConfig) -> Self { Self { cfg, stats: SearchStats::default() } }

    fn search(&mut self, board: Board, score: Score) -> Option<Move> {
        let mut stats = SearchStats::default();
        let mut best = BestLeaf::new(score);
        let mut queue = VecDeque::from([Node::root(board, score)]);
        while let Some(node) = queue.pop_front() {
            stats.nodes += 1;
            if node.path.len() >= self.cfg.max_depth {
                stats.leaves += 1;
                best.offer(node);
                continue;
            }
            queue.extend(node.children());
        }
        self.stats = stats;
        best.first_move()
    }
}

impl Strategy for BreadthBounded {
    fn name(&self) -> String { "BFS".to_string() }

    fn best_move(&mut self, board: Board, score: Score) -> Option<Move> {
        let choice = self.search(board, score);
        debug!("bfs: nodes={} leaves={} choice={:?}", self.stats.nodes, self.stats.leaves, choice);
        choice
    }

    fn last_stats(&self) -> SearchStats { self.stats }

    fn reset_stats(&mut self) { self.stats = SearchStats::default() }
}
