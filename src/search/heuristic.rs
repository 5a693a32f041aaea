use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::engine::{Board, SIZE};
use crate::error::Error;

/// Frontier priority; lower values are expanded first.
pub type Priority = u64;

/// Board scoring functions for ordering the best-first frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    /// Number of empty cells.
    #[default]
    EmptyTiles,
    /// Largest tile on the board, used as the priority directly.
    MaxTile,
    /// Descending adjacent pairs within each row.
    Monotonicity,
    /// Value gaps between orthogonal neighbours.
    Clustering,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] =
        [Heuristic::EmptyTiles, Heuristic::MaxTile, Heuristic::Monotonicity, Heuristic::Clustering];

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::EmptyTiles => "empty_tiles",
            Heuristic::MaxTile => "max_tile",
            Heuristic::Monotonicity => "monotonicity",
            Heuristic::Clustering => "clustering",
        }
    }

    /// Lenient selector lookup: anything unrecognised falls back to
    /// [`Heuristic::EmptyTiles`]. Use `str::parse` to reject unknown names.
    ///
    /// ```
    /// use lookahead_2048::search::Heuristic;
    /// assert_eq!(Heuristic::from_selector("clustering"), Heuristic::Clustering);
    /// assert_eq!(Heuristic::from_selector("nope"), Heuristic::EmptyTiles);
    /// ```
    pub fn from_selector(name: &str) -> Self {
        name.parse().unwrap_or_else(|err| {
            warn!("{err}; falling back to {}", Heuristic::default());
            Heuristic::default()
        })
    }

    #[inline]
    pub fn evaluate(self, board: &Board) -> Priority {
        match self {
            Heuristic::EmptyTiles => empty_tiles(board),
            Heuristic::MaxTile => max_tile(board),
            Heuristic::Monotonicity => monotonicity(board),
            Heuristic::Clustering => clustering(board),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| Error::UnknownHeuristic(s.to_string()))
    }
}

fn empty_tiles(board: &Board) -> Priority { board.count_empty() as Priority }

fn max_tile(board: &Board) -> Priority { Priority::from(board.highest_tile()) }

fn monotonicity(board: &Board) -> Priority {
    board
        .rows()
        .iter()
        .map(|row| row.windows(2).filter(|pair| pair[0] > pair[1]).count() as Priority)
        .sum()
}

fn clustering(board: &Board) -> Priority {
    const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    let mut total = 0;
    for row in 0..SIZE {
        for col in 0..SIZE {
            let tile = board.get(row, col);
            if tile == 0 {
                continue;
            }
            for (dr, dc) in NEIGHBOURS {
                let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                    continue;
                };
                if r < SIZE && c < SIZE {
                    total += Priority::from(tile.abs_diff(board.get(r, c)));
                }
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [[u32; 4]; 4]) -> Board { Board::from_rows(rows) }

    #[test]
    fn it_empty_tiles() {
        assert_eq!(Heuristic::EmptyTiles.evaluate(&Board::EMPTY), 16);
        assert_eq!(Heuristic::EmptyTiles.evaluate(&board([[2, 2, 0, 0], [0; 4], [0; 4], [0, 0, 0, 8]])), 13);
    }

    #[test]
    fn it_max_tile() {
        assert_eq!(Heuristic::MaxTile.evaluate(&Board::EMPTY), 0);
        assert_eq!(Heuristic::MaxTile.evaluate(&board([[2, 0, 0, 0], [0; 4], [0, 64, 0, 0], [0; 4]])), 64);
    }

    #[test]
    fn monotonicity_counts_row_inversions() {
        let b = board([[8, 4, 2, 0], [2, 4, 8, 16], [4, 2, 4, 2], [0; 4]]);
        assert_eq!(Heuristic::Monotonicity.evaluate(&b), 3 + 0 + 2);
    }

    #[test]
    fn monotonicity_zero_iff_rows_non_decreasing() {
        let sorted = board([[0, 2, 4, 8], [2, 2, 2, 2], [0, 0, 0, 0], [0, 0, 4, 1024]]);
        assert_eq!(Heuristic::Monotonicity.evaluate(&sorted), 0);
        let one_drop = board([[0, 2, 4, 8], [2, 2, 2, 2], [0, 0, 0, 0], [0, 0, 1024, 4]]);
        assert_eq!(Heuristic::Monotonicity.evaluate(&one_drop), 1);
    }

    #[test]
    fn clustering_skips_out_of_grid_neighbours() {
        // Lone corner tile: only its two in-grid neighbours count.
        let corner = board([[8, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(Heuristic::Clustering.evaluate(&corner), 16);
        // Interior tile has four neighbours.
        let interior = board([[0; 4], [0, 4, 0, 0], [0; 4], [0; 4]]);
        assert_eq!(Heuristic::Clustering.evaluate(&interior), 16);
    }

    #[test]
    fn clustering_of_pair() {
        let b = board([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        // 2: |2-4| + |2-0| = 4; 4: |4-2| + |4-0| + |4-0| = 10
        assert_eq!(Heuristic::Clustering.evaluate(&b), 14);
        let uniform = board([[2; 4]; 4]);
        assert_eq!(Heuristic::Clustering.evaluate(&uniform), 0);
    }

    #[test]
    fn strict_parse_rejects_unknown_names() {
        assert_eq!("max_tile".parse::<Heuristic>(), Ok(Heuristic::MaxTile));
        assert_eq!("Monotonicity".parse::<Heuristic>(), Ok(Heuristic::Monotonicity));
        assert_eq!("empty-tiles".parse::<Heuristic>(), Ok(Heuristic::EmptyTiles));
        assert_eq!("manhattan".parse::<Heuristic>(), Err(Error::UnknownHeuristic("manhattan".into())));
    }

    #[test]
    fn lenient_selector_defaults_to_empty_tiles() {
        for h in Heuristic::ALL {
            assert_eq!(Heuristic::from_selector(h.name()), h);
        }
        assert_eq!(Heuristic::from_selector(""), Heuristic::EmptyTiles);
    }
}
