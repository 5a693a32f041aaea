use log::debug;

use crate::engine::{self, Board, Move, Score};

use super::{SearchConfig, SearchStats, Strategy};

/// Recursive depth-first search returning the move with the best descendant score.
#[derive(Debug, Default)]
pub struct DepthBounded {
    cfg: SearchConfig,
    stats: SearchStats,
}

/// Best score reachable from a node, and the move at that node leading to it.
///
/// `best_move` is `None` when no child beats the node's own score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DepthOutcome {
    score: Score,
    best_move: Option<Move>,
}

impl DepthBounded {
    pub fn new() -> Self { Self::with_config(SearchConfig::default()) }

    pub fn with_config(cfg: SearchConfig) -> Self { Self { cfg, stats: SearchStats::default() } }

    fn search(&mut self, board: Board, score: Score, depth: usize) -> DepthOutcome {
        self.stats.nodes += 1;
        let mut outcome = DepthOutcome { score, best_move: None };
        if depth == 0 || engine::is_terminal(board) {
            self.stats.leaves += 1;
            return outcome;
        }
        for dir in Move::ALL {
            let next = engine::apply_move(board, score, dir);
            if !next.changed {
                continue;
            }
            let child = self.search(next.board, next.score, depth - 1);
            if child.score > outcome.score {
                outcome = DepthOutcome { score: child.score, best_move: Some(dir) };
            }
        }
        outcome
    }
}

impl Strategy for DepthBounded {
    fn name(&self) -> String { "DFS".to_string() }

    fn best_move(&mut self, board: Board, score: Score) -> Option<Move> {
        self.reset_stats();
        let outcome = self.search(board, score, self.cfg.max_depth);
        debug!(
            "dfs: nodes={} leaves={} best_score={} choice={:?}",
            self.stats.nodes, self.stats.leaves, outcome.score, outcome.best_move
        );
        outcome.best_move
    }

    fn last_stats(&self) -> SearchStats { self.stats }

    fn reset_stats(&mut self) { self.stats = SearchStats::default() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_pair_to_the_left() {
        let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(DepthBounded::new().best_move(b, 0), Some(Move::Left));
    }

    #[test]
    fn follows_the_deeper_payoff() {
        let b = Board::from_rows([[2, 4, 8, 16], [2, 8, 16, 32], [0; 4], [0; 4]]);
        let mut dfs = DepthBounded::new();
        let outcome = dfs.search(b, 0, 3);
        assert_eq!(outcome, DepthOutcome { score: 60, best_move: Some(Move::Down) });
        assert_eq!(dfs.best_move(b, 0), Some(Move::Down));
    }

    #[test]
    fn intermediate_nodes_report_scores() {
        // One ply left: the node's own best merge is visible without a move at the root.
        let b = Board::from_rows([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut dfs = DepthBounded::new();
        assert_eq!(dfs.search(b, 10, 1), DepthOutcome { score: 18, best_move: Some(Move::Left) });
        assert_eq!(dfs.search(b, 10, 0), DepthOutcome { score: 10, best_move: None });
    }

    #[test]
    fn no_move_without_any_merge() {
        let b = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [0; 4], [0; 4]]);
        assert_eq!(DepthBounded::new().best_move(b, 0), None);
    }

    #[test]
    fn terminal_board_is_a_leaf() {
        let b = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let mut dfs = DepthBounded::new();
        assert_eq!(dfs.best_move(b, 0), None);
        assert_eq!(dfs.last_stats(), SearchStats { nodes: 1, leaves: 1 });
    }

    #[test]
    fn stats_reset_per_call() {
        let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut dfs = DepthBounded::new();
        dfs.best_move(b, 0);
        let first = dfs.last_stats();
        dfs.best_move(b, 0);
        assert_eq!(dfs.last_stats(), first);
        assert!(first.nodes <= 1 + 4 + 16 + 64);
    }
}
