//! Mailbox board representation.

use chess_core::{Color, Piece, Square};
use std::fmt;

/// An 8x8 board holding one byte per square.
///
/// `0` is an empty square; any other value packs a piece kind and color.
/// The whole board is 64 bytes and `Copy`, so every move application
/// works on a fresh copy and no two search branches ever share one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([u8; 64]);

#[inline]
const fn encode(piece: Piece, color: Color) -> u8 {
    1 + (piece.index() as u8) * 2 + color.index() as u8
}

#[inline]
const fn decode(code: u8) -> Option<(Piece, Color)> {
    if code == 0 {
        return None;
    }
    let raw = code - 1;
    let color = if raw & 1 == 0 {
        Color::White
    } else {
        Color::Black
    };
    match Piece::from_index((raw / 2) as usize) {
        Some(piece) => Some((piece, color)),
        None => None,
    }
}

impl Board {
    /// An empty board.
    pub const EMPTY: Board = Board([0; 64]);

    /// Creates a board from a list of placed pieces.
    pub fn from_pieces<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = (Square, Piece, Color)>,
    {
        let mut board = Board::EMPTY;
        for (sq, piece, color) in pieces {
            board.set(sq, piece, color);
        }
        board
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        decode(self.0[sq.index() as usize])
    }

    /// Returns the piece at a display coordinate (row 0 = rank 8).
    pub fn piece_at_row_col(&self, row: u8, col: u8) -> Option<(Piece, Color)> {
        Square::from_row_col(row, col).and_then(|sq| self.piece_at(sq))
    }

    /// Returns true if nothing stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.0[sq.index() as usize] == 0
    }

    /// Returns the color of the piece on the square, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(_, color)| color)
    }

    /// Returns true if the square holds exactly this piece.
    #[inline]
    pub fn has(&self, sq: Square, piece: Piece, color: Color) -> bool {
        self.0[sq.index() as usize] == encode(piece, color)
    }

    /// Places a piece, replacing whatever was there.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Piece, color: Color) {
        self.0[sq.index() as usize] = encode(piece, color);
    }

    /// Empties the square.
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0[sq.index() as usize] = 0;
    }

    /// Iterates over every occupied square.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|(p, c)| (sq, p, c)))
    }

    /// Iterates over the squares holding pieces of the given color.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.color_at(sq) == Some(color))
    }

    /// Returns the square of the given side's king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.has(sq, Piece::King, color))
    }

    /// Counts the pieces of a given kind and color.
    pub fn count(&self, piece: Piece, color: Color) -> usize {
        let code = encode(piece, color);
        self.0.iter().filter(|&&c| c == code).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::EMPTY
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                let c = match self.piece_at_row_col(row, col) {
                    Some((piece, color)) => piece.to_fen_char(color),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
