//! Error types for the rules engine.

use chess_core::{Color, FenError, Move, Piece, Square};
use thiserror::Error;

/// Errors raised when building a position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },

    /// The side that just moved left its own king attacked.
    #[error("{color} king is attacked but {color} is not to move")]
    OpponentInCheck { color: Color },
}

/// Errors raised at the move-application boundary.
///
/// Running out of search time is not represented here: it is the normal
/// way a search ends and always yields a result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    /// The move is not among the legal moves of its origin square.
    #[error("illegal move requested: {0}")]
    IllegalMoveRequested(Move),

    /// A pawn may only promote to a knight, bishop, rook, or queen.
    #[error("invalid promotion choice: {0}")]
    InvalidPromotionChoice(Piece),

    /// A pawn reached the last rank and nobody picked a piece for it.
    #[error("move {0} promotes a pawn but no promotion piece was given")]
    PromotionRequired(Move),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("could not parse move '{0}'")]
    UnparsableMove(String),
}
