//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and the
//! search:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] and [`Special`] for move representation
//! - [`CastlingRights`] for the four castling flags
//! - [`FenRecord`] for FEN parsing and serialization

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use color::Color;
pub use fen::{FenError, FenRecord};
pub use mov::{Move, Special};
pub use piece::Piece;
pub use square::{File, Rank, Square};
