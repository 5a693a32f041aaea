//! lookahead-2048: a 2048 game engine plus bounded lookahead move pickers
//!
//! This crate provides:
//! - A `Board` value type with pure transitions (`engine::apply_move`, `Board::shift`, ...)
//! - Three search strategies behind one `search::Strategy` trait: breadth-first,
//!   depth-first and best-first with pluggable heuristics
//! - A live `game::Game` and a `game::play` loop that lets a strategy drive it
//!
//! Quick start:
//! ```
//! use lookahead_2048::engine::{apply_move, Board, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
//! let out = apply_move(b0, 0, Move::Left);
//! assert!(out.board.count_non_empty() <= 2);
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use lookahead_2048::game::Game;
//! use lookahead_2048::search::{BestFirst, Heuristic, Strategy};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(123);
//! let mut game = Game::new(&mut rng);
//! let mut policy = BestFirst::new(Heuristic::Monotonicity);
//! let mut moves = 0u32;
//!
//! // Keep doctests fast: only a few moves
//! while !game.is_game_over() && moves < 4 {
//!     match policy.best_move(game.board(), game.score()) {
//!         Some(dir) => {
//!             game.make_move(dir, &mut rng);
//!             moves += 1;
//!         }
//!         None => break,
//!     }
//! }
//! assert!(moves > 0);
//! ```
//!
pub mod engine;
pub mod error;
pub mod game;
pub mod search;

pub use error::Error;
