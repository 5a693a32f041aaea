//! The live game and the loop that lets a strategy play it.

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::engine::{self, Board, Move, Score, Tile};
use crate::search::Strategy;

/// The one live board/score pair a driver owns for the whole game.
///
/// Strategies only ever see copies handed out by [`Game::board`] and
/// [`Game::score`]; the live state changes solely through [`Game::make_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    score: Score,
}

impl Game {
    /// Start a new game: empty board plus two spawned tiles.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Game { board: Board::EMPTY, score: 0 };
        game.reset(rng);
        game
    }

    pub fn from_parts(board: Board, score: Score) -> Self { Game { board, score } }

    /// Clear the board and score, then spawn two tiles.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board = Board::EMPTY.with_random_tile(rng).with_random_tile(rng);
        self.score = 0;
    }

    #[inline]
    pub fn board(&self) -> Board { self.board }

    #[inline]
    pub fn score(&self) -> Score { self.score }

    /// Apply `direction` to the live state and spawn a tile if anything moved.
    ///
    /// Returns whether the board changed.
    pub fn make_move<R: Rng + ?Sized>(&mut self, direction: Move, rng: &mut R) -> bool {
        let next = engine::apply_move(self.board, self.score, direction);
        if next.changed {
            self.board = engine::spawn_tile(next.board, rng);
            self.score = next.score;
        }
        next.changed
    }

    #[inline]
    pub fn is_game_over(&self) -> bool { self.board.is_game_over() }
}

/// Why [`play`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// No move changes the board.
    GameOver,
    /// The strategy found no improving move, or proposed one that did nothing.
    Stalled,
    /// The configured move cap was hit.
    MoveLimit,
}

/// Summary of one finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub score: Score,
    pub moves: u64,
    pub highest_tile: Tile,
    pub end: EndReason,
}

/// Let `strategy` play `game` until it ends, calling `on_move` after every applied move.
pub fn play_with<S, R, F>(
    game: &mut Game,
    strategy: &mut S,
    rng: &mut R,
    max_moves: Option<u64>,
    mut on_move: F,
) -> GameOutcome
where
    S: Strategy + ?Sized,
    R: Rng + ?Sized,
    F: FnMut(Move, &Game),
{
    info!("{}: game start, score={}", strategy.name(), game.score());
    let mut moves = 0u64;
    let end = loop {
        if game.is_game_over() {
            break EndReason::GameOver;
        }
        if max_moves.is_some_and(|cap| moves >= cap) {
            break EndReason::MoveLimit;
        }
        let Some(direction) = strategy.best_move(game.board(), game.score()) else {
            debug!("{}: no improving move after {} moves", strategy.name(), moves);
            break EndReason::Stalled;
        };
        if !game.make_move(direction, rng) {
            break EndReason::Stalled;
        }
        moves += 1;
        on_move(direction, game);
    };
    let outcome = GameOutcome { score: game.score(), moves, highest_tile: game.board().highest_tile(), end };
    info!(
        "{}: game end ({:?}) score={} moves={} highest_tile={}",
        strategy.name(),
        outcome.end,
        outcome.score,
        outcome.moves,
        outcome.highest_tile
    );
    outcome
}

/// Let `strategy` play `game` until it ends.
///
/// ```
/// use lookahead_2048::game::{play, Game};
/// use lookahead_2048::search::BreadthBounded;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let mut game = Game::new(&mut rng);
/// let outcome = play(&mut game, &mut BreadthBounded::new(), &mut rng, Some(20));
/// assert!(outcome.moves <= 20);
/// assert_eq!(outcome.score, game.score());
/// ```
pub fn play<S, R>(game: &mut Game, strategy: &mut S, rng: &mut R, max_moves: Option<u64>) -> GameOutcome
where
    S: Strategy + ?Sized,
    R: Rng + ?Sized,
{
    play_with(game, strategy, rng, max_moves, |_, _| {})
}
