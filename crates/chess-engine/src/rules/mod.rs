//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait which bundles everything a
//! caller needs to drive a game: the starting position, move generation,
//! move application, and the game status.

mod standard;

pub use standard::{status, StandardChess};

use crate::{is_promotion, GameState, MoveList};
use chess_core::Move;

/// Outcome of inspecting a position for the side to move.
///
/// Only checkmate and stalemate end a game. Repetition, the fifty-move
/// rule, and insufficient material are not detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    Ongoing,
    /// The side to move has no legal moves and its king is attacked.
    Checkmate,
    /// The side to move has no legal moves and its king is safe.
    Stalemate,
}

impl GameStatus {
    /// Returns true if the game cannot continue.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Trait for implementing chess rules.
///
/// # Example
///
/// ```
/// use chess_engine::rules::{GameStatus, RuleSet};
/// use chess_engine::StandardChess;
///
/// let state = StandardChess.initial_position();
/// let moves = StandardChess.generate_moves(&state);
/// assert_eq!(moves.len(), 20);
/// assert_eq!(StandardChess.status(&state), GameStatus::Ongoing);
/// ```
pub trait RuleSet {
    /// Returns the initial position.
    fn initial_position(&self) -> GameState;

    /// Generates all legal moves for the given state.
    fn generate_moves(&self, state: &GameState) -> MoveList;

    /// Returns true if the given move is legal in the state.
    ///
    /// Generated moves carry no promotion piece, so a promotion choice is
    /// accepted only on a pawn move that reaches the last rank.
    fn is_legal(&self, state: &GameState, m: Move) -> bool {
        let bare = Move {
            promotion: None,
            ..m
        };
        if !self.generate_moves(state).contains(&bare) {
            return false;
        }
        match m.promotion {
            Some(piece) => piece.is_promotion_choice() && is_promotion(&state.board, m),
            None => true,
        }
    }

    /// Makes a move, returning the new state. The move is not validated.
    fn make_move(&self, state: &GameState, m: Move) -> GameState;

    /// Attempts to make a move, returning `None` if illegal or if a pawn
    /// reaches the last rank without a promotion piece.
    fn try_make_move(&self, state: &GameState, m: Move) -> Option<GameState> {
        if !self.is_legal(state, m) {
            return None;
        }
        crate::apply(state, m, None).ok()
    }

    /// Returns true if the side to move is in check.
    fn is_check(&self, state: &GameState) -> bool;

    /// Classifies the state as ongoing, checkmate, or stalemate.
    fn status(&self, state: &GameState) -> GameStatus;

    /// Returns true if the game is over.
    fn is_game_over(&self, state: &GameState) -> bool {
        self.status(state).is_over()
    }
}
