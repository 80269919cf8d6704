//! Standard chess rules implementation.

use super::{GameStatus, RuleSet};
use crate::movegen::{self, has_legal_move, is_king_attacked};
use crate::{GameState, MoveList};
use chess_core::Move;

/// Standard chess rules:
/// - Standard piece movement
/// - Castling (kingside and queenside)
/// - En passant
/// - Pawn promotion
/// - Check, checkmate, and stalemate detection
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_position(&self) -> GameState {
        GameState::startpos()
    }

    fn generate_moves(&self, state: &GameState) -> MoveList {
        movegen::generate_moves(state)
    }

    fn make_move(&self, state: &GameState, m: Move) -> GameState {
        crate::make_move(state, m)
    }

    fn is_check(&self, state: &GameState) -> bool {
        is_king_attacked(&state.board, state.side_to_move)
    }

    fn status(&self, state: &GameState) -> GameStatus {
        status(state)
    }
}

/// Classifies the state for the side to move.
pub fn status(state: &GameState) -> GameStatus {
    if has_legal_move(state) {
        GameStatus::Ongoing
    } else if is_king_attacked(&state.board, state.side_to_move) {
        GameStatus::Checkmate
    } else {
        GameStatus::Stalemate
    }
}
