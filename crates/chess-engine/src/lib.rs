//! Chess rules engine on a mailbox board.
//!
//! This crate provides:
//! - [`Board`] - one byte per square, cheap to copy
//! - [`GameState`] - board plus side to move, castling rights and en passant
//! - [`Game`] - game management with validation and history tracking
//! - [`RuleSet`] - trait for implementing chess variants
//! - Legal move generation, move execution and perft
//!
//! # Architecture
//!
//! Every move produces a fresh [`GameState`]; nothing is mutated in place.
//! Legality is enforced by a single filter: each pseudo-legal move is
//! applied to a scratch copy and rejected if it leaves the mover's own king
//! attacked. Search code can apply moves without re-validating them through
//! [`make_move`].
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, GameStatus, RuleSet, StandardChess};
//!
//! let state = StandardChess.initial_position();
//! let moves = StandardChess.generate_moves(&state);
//! assert_eq!(moves.len(), 20);
//!
//! let mut game = Game::new();
//! game.play_uci("e2e4").unwrap();
//! game.play_uci("e7e5").unwrap();
//! assert_eq!(game.status(), GameStatus::Ongoing);
//! println!("Position after 1.e4 e5: {}", game.state().to_fen());
//! ```

mod board;
mod error;
mod execute;
mod game;
pub mod movegen;
pub mod rules;
mod state;

pub use board::Board;
pub use error::{PositionError, RulesError};
pub use execute::{apply, make_move};
pub use game::{Game, GameMove};
pub use movegen::{
    generate_moves, has_legal_move, is_king_attacked, is_promotion, is_square_attacked,
    legal_moves, pseudo_legal_moves, MoveList,
};
pub use rules::{status, GameStatus, RuleSet, StandardChess};
pub use state::GameState;
