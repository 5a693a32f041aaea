use rand::seq::IteratorRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Side length of the square grid.
pub const SIZE: usize = 4;

pub type Tile = u32;
pub type Score = u64;
type Grid = [[Tile; SIZE]; SIZE];

/// A direction to move/merge tiles.
///
/// `Move::ALL` is the order every strategy explores children in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Left, Move::Right, Move::Up, Move::Down];

    /// Lowercase label used on the command line and in reports.
    pub fn label(self) -> &'static str {
        match self {
            Move::Left => "left",
            Move::Right => "right",
            Move::Up => "up",
            Move::Down => "down",
        }
    }

    /// Clockwise quarter turns that make this move a left shift.
    fn quarter_turns(self) -> usize {
        match self {
            Move::Left => 0,
            Move::Down => 1,
            Move::Right => 2,
            Move::Up => 3,
        }
    }
}

// Moves order by label so frontier ordering matches that of plain labelled sequences.
impl Ord for Move {
    fn cmp(&self, other: &Self) -> Ordering { self.label().cmp(other.label()) }
}

impl PartialOrd for Move {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidMove(s.to_string()))
    }
}

/// A 4x4 board of tile values, 0 meaning empty.
///
/// `Board` is `Copy`: every transformation returns a fresh board and never
/// aliases the caller's grid. Ordering is row-major lexicographic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Board(Grid);

/// Result of applying one move to a board/score pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub score: Score,
    pub changed: bool,
}

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Construct a `Board` from rows, top to bottom.
    ///
    /// ```
    /// use lookahead_2048::engine::Board;
    /// let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn from_rows(rows: Grid) -> Self { Board(rows) }

    /// Borrow the rows of this board, top to bottom.
    #[inline]
    pub fn rows(&self) -> &Grid { &self.0 }

    /// Value at `(row, col)`; 0 if empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile { self.0[row][col] }

    /// Return the board resulting from sliding/merging tiles in `dir`, along
    /// with the points the merges earned. No random insert.
    ///
    /// ```
    /// use lookahead_2048::engine::{Board, Move};
    /// let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// let (next, gained) = b.shift(Move::Left);
    /// assert_eq!(next.rows()[0], [4, 0, 0, 0]);
    /// assert_eq!(gained, 4);
    /// ```
    pub fn shift(self, dir: Move) -> (Self, Score) {
        let turns = dir.quarter_turns();
        let mut grid = rotate(self.0, turns);
        let mut gained = 0;
        for row in grid.iter_mut() {
            let (merged, points) = merge_row_left(*row);
            *row = merged;
            gained += points;
        }
        (Board(rotate(grid, (4 - turns) % 4)), gained)
    }

    /// Place a 2 on an empty cell chosen uniformly at random.
    ///
    /// A full board is returned unchanged.
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        match self.empty_cells().choose(rng) {
            Some((row, col)) => {
                let mut grid = self.0;
                grid[row][col] = SPAWN_TILE;
                Board(grid)
            }
            None => self,
        }
    }

    /// Return true if no move in any direction changes the board.
    ///
    /// ```
    /// use lookahead_2048::engine::Board;
    /// // Nothing slides on an empty board either.
    /// assert!(Board::EMPTY.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(self) -> bool { is_terminal(self) }

    /// Return the highest tile value present on the board.
    #[inline]
    pub fn highest_tile(self) -> Tile { self.cells().max().unwrap_or(0) }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize { self.cells().filter(|&t| t == 0).count() }

    /// Count the number of occupied cells on the board.
    #[inline]
    pub fn count_non_empty(self) -> usize { SIZE * SIZE - self.count_empty() }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.0[row][col] == 0)
    }

    /// Every tile value, row-major.
    pub fn cells(self) -> impl Iterator<Item = Tile> {
        self.0.into_iter().flatten()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.0).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for (idx, row) in self.0.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(format_val).collect();
            writeln!(f, "{}", cells.join("|"))?;
            if idx + 1 < SIZE {
                writeln!(f, "-------------------------------")?;
            }
        }
        Ok(())
    }
}

impl From<Grid> for Board { fn from(rows: Grid) -> Self { Board::from_rows(rows) } }
impl From<Board> for Grid { fn from(b: Board) -> Self { b.0 } }

/// Apply `direction` to a board/score pair without touching either input.
///
/// ```
/// use lookahead_2048::engine::{apply_move, Board, Move};
/// let b = Board::from_rows([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
/// let out = apply_move(b, 10, Move::Left);
/// assert!(!out.changed);
/// assert_eq!(out.board, b);
/// assert_eq!(out.score, 10);
/// ```
pub fn apply_move(board: Board, score: Score, direction: Move) -> MoveOutcome {
    let (next, gained) = board.shift(direction);
    MoveOutcome { board: next, score: score + gained, changed: next != board }
}

/// Place a 2 on a uniformly chosen empty cell. No-op on a full board.
pub fn spawn_tile<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Board { board.with_random_tile(rng) }

/// True if none of the four moves would change the board.
pub fn is_terminal(board: Board) -> bool {
    Move::ALL.into_iter().all(|dir| !apply_move(board, 0, dir).changed)
}

const SPAWN_TILE: Tile = 2;

fn rotate(grid: Grid, turns: usize) -> Grid {
    (0..turns).fold(grid, |g, _| rotate_clockwise(g))
}

fn rotate_clockwise(grid: Grid) -> Grid {
    let mut out = [[0; SIZE]; SIZE];
    for (row, line) in out.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            *cell = grid[SIZE - 1 - col][row];
        }
    }
    out
}

/// Compact a row to the left and merge equal neighbours, each tile at most once.
fn merge_row_left(row: [Tile; SIZE]) -> ([Tile; SIZE], Score) {
    let mut out = [0; SIZE];
    let mut gained = 0;
    let mut tiles = row.into_iter().filter(|&t| t != 0).peekable();
    let mut idx = 0;
    while let Some(tile) = tiles.next() {
        if tiles.peek() == Some(&tile) {
            tiles.next();
            out[idx] = tile * 2;
            gained += Score::from(tile * 2);
        } else {
            out[idx] = tile;
        }
        idx += 1;
    }
    (out, gained)
}

fn format_val(val: &Tile) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{:^7}", x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn row0(row: [Tile; 4]) -> Board { Board::from_rows([row, [0; 4], [0; 4], [0; 4]]) }

    // Full board with no equal neighbours in any row or column.
    fn stuck() -> Board {
        Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]])
    }

    #[test]
    fn it_merge_row_left() {
        assert_eq!(merge_row_left([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
        assert_eq!(merge_row_left([2, 4, 2, 4]), ([2, 4, 2, 4], 0));
        assert_eq!(merge_row_left([2, 2, 4, 4]), ([4, 8, 0, 0], 12));
        assert_eq!(merge_row_left([2, 0, 0, 2]), ([4, 0, 0, 0], 4));
        assert_eq!(merge_row_left([2, 2, 2, 0]), ([4, 2, 0, 0], 4));
        assert_eq!(merge_row_left([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
        assert_eq!(merge_row_left([4, 2, 2, 0]), ([4, 4, 0, 0], 4));
    }

    #[test]
    fn test_move_left_merges_pair() {
        let out = apply_move(row0([2, 2, 0, 0]), 0, Move::Left);
        assert_eq!(out.board, row0([4, 0, 0, 0]));
        assert_eq!(out.score, 4);
        assert!(out.changed);
    }

    #[test]
    fn test_move_left_packed_row_unchanged() {
        let b = row0([2, 4, 8, 16]);
        let out = apply_move(b, 7, Move::Left);
        assert_eq!(out.board, b);
        assert_eq!(out.score, 7);
        assert!(!out.changed);
    }

    #[test]
    fn test_move_right() {
        let b = Board::from_rows([[2, 4, 8, 16], [2, 2, 4, 4], [0, 2, 2, 2], [2, 0, 0, 2]]);
        let out = apply_move(b, 0, Move::Right);
        assert_eq!(
            out.board,
            Board::from_rows([[2, 4, 8, 16], [0, 0, 4, 8], [0, 0, 2, 4], [0, 0, 0, 4]])
        );
        assert_eq!(out.score, 12 + 4 + 4);
    }

    #[test]
    fn test_move_up() {
        let b = Board::from_rows([[2, 0, 4, 2], [2, 4, 0, 2], [4, 0, 4, 2], [0, 4, 8, 0]]);
        let out = apply_move(b, 0, Move::Up);
        assert_eq!(
            out.board,
            Board::from_rows([[4, 8, 8, 4], [4, 0, 8, 2], [0, 0, 0, 0], [0, 0, 0, 0]])
        );
        assert_eq!(out.score, 4 + 8 + 8 + 4);
    }

    #[test]
    fn test_move_down() {
        let b = Board::from_rows([[2, 0, 4, 2], [2, 4, 0, 2], [4, 0, 4, 2], [0, 4, 8, 0]]);
        let out = apply_move(b, 0, Move::Down);
        assert_eq!(
            out.board,
            Board::from_rows([[0, 0, 0, 0], [0, 0, 0, 0], [4, 0, 8, 2], [4, 8, 8, 4]])
        );
        assert_eq!(out.score, 4 + 8 + 8 + 4);
    }

    #[test]
    fn apply_move_leaves_input_untouched() {
        let b = row0([2, 2, 0, 0]);
        let copy = b;
        let _ = apply_move(b, 0, Move::Left);
        assert_eq!(b, copy);
    }

    #[test]
    fn moves_never_add_tiles_and_noops_are_idempotent() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
        let all_noops = |b: Board| Move::ALL.into_iter().all(|d| !apply_move(b, 0, d).changed);
        for i in 0..200 {
            assert_eq!(is_terminal(b), all_noops(b));
            for dir in Move::ALL {
                let out = apply_move(b, 0, dir);
                assert!(out.board.count_non_empty() <= b.count_non_empty());
                if !out.changed {
                    assert_eq!(out.board, b);
                    assert!(!apply_move(out.board, 0, dir).changed);
                }
            }
            let dir = Move::ALL[i % 4];
            let out = apply_move(b, 0, dir);
            b = if out.changed { out.board.with_random_tile(&mut rng) } else { b.with_random_tile(&mut rng) };
            assert_eq!(is_terminal(b), all_noops(b));
            if b.is_game_over() {
                b = Board::EMPTY.with_random_tile(&mut rng);
            }
        }
    }

    #[test]
    fn stuck_board_is_terminal() {
        let b = stuck();
        for dir in Move::ALL {
            assert!(!apply_move(b, 0, dir).changed, "{dir} should not change the board");
        }
        assert!(is_terminal(b));
        assert!(!is_terminal(row0([2, 2, 0, 0])));
    }

    #[test]
    fn spawn_only_places_twos_on_empty_cells() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut b = Board::EMPTY;
        for expected_empty in (0..16).rev() {
            b = spawn_tile(b, &mut rng);
            assert_eq!(b.count_empty(), expected_empty);
        }
        assert!(b.cells().all(|t| t == 2));
    }

    #[test]
    fn spawn_on_full_board_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(spawn_tile(stuck(), &mut rng), stuck());
    }

    #[test]
    fn spawn_reaches_every_empty_cell() {
        let mut rng = StdRng::seed_from_u64(17);
        let b = row0([2, 4, 8, 16]);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let next = b.with_random_tile(&mut rng);
            assert_eq!(next.count_empty(), 11);
            let (r, c) = b.empty_cells().find(|&(r, c)| next.get(r, c) == 2).unwrap();
            seen.insert((r, c));
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn it_highest_tile() {
        assert_eq!(Board::EMPTY.highest_tile(), 0);
        assert_eq!(row0([2, 512, 8, 16]).highest_tile(), 512);
    }

    #[test]
    fn move_labels_round_trip() {
        for m in Move::ALL {
            assert_eq!(m.label().parse::<Move>(), Ok(m));
        }
        assert_eq!("UP".parse::<Move>(), Ok(Move::Up));
        assert_eq!("sideways".parse::<Move>(), Err(Error::InvalidMove("sideways".into())));
    }

    #[test]
    fn moves_order_by_label() {
        let mut all = Move::ALL.to_vec();
        all.sort();
        assert_eq!(all, vec![Move::Down, Move::Left, Move::Right, Move::Up]);
    }
}
