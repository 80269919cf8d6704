//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// Special handling a move needs beyond relocating one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Special {
    /// Normal move (no special action).
    #[default]
    None = 0,
    /// En passant capture; the captured pawn is behind the destination.
    EnPassant = 1,
    /// Kingside castling (O-O).
    CastleKingside = 2,
    /// Queenside castling (O-O-O).
    CastleQueenside = 3,
}

impl Special {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, Special::CastleKingside | Special::CastleQueenside)
    }
}

/// A chess move.
///
/// The generator never fills in `promotion`: a pawn move onto the last rank
/// is emitted once and the piece choice is attached later, either by the
/// caller (see [`Move::with_promotion`]) or by the search, which always
/// picks a queen.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub special: Special,
    pub promotion: Option<Piece>,
}

impl Move {
    /// Creates a new move without a promotion choice.
    #[inline]
    pub const fn new(from: Square, to: Square, special: Special) -> Self {
        Move {
            from,
            to,
            special,
            promotion: None,
        }
    }

    /// Creates a normal move (no special handling).
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, Special::None)
    }

    /// Returns the same move with the given promotion piece attached.
    #[inline]
    pub const fn with_promotion(self, piece: Piece) -> Self {
        Move {
            promotion: Some(piece),
            ..self
        }
    }

    /// Returns true if `other` names the same from/to squares, ignoring
    /// the special tag and the promotion choice.
    #[inline]
    pub fn same_squares(self, other: Move) -> bool {
        self.from == other.from && self.to == other.to
    }

    /// Returns the long algebraic notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(piece) => format!("{}{}{}", self.from, self.to, piece.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from long algebraic notation.
    ///
    /// Only the squares and the promotion letter are recovered; the
    /// `special` tag is inferred by matching against generated moves.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let mov = Move::normal(from, to);
        match s.chars().nth(4) {
            Some(c) => {
                let piece = Piece::from_char(c)?;
                if !piece.is_promotion_choice() {
                    return None;
                }
                Some(mov.with_promotion(piece))
            }
            None => Some(mov),
        }
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move::normal(Square::A1, Square::A1);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.special {
            Special::None => write!(f, "Move({})", self.to_uci()),
            special => write!(f, "Move({}, {:?})", self.to_uci(), special),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_uci() {
        let m = Move::normal(sq("e2"), sq("e4"));
        assert_eq!(m.to_uci(), "e2e4");

        let promo = Move::normal(sq("e7"), sq("e8")).with_promotion(Piece::Queen);
        assert_eq!(promo.to_uci(), "e7e8q");

        let knight = Move::normal(sq("a2"), sq("b1")).with_promotion(Piece::Knight);
        assert_eq!(knight.to_uci(), "a2b1n");
    }

    #[test]
    fn move_from_uci() {
        let m = Move::from_uci("e2e4").unwrap();
        assert_eq!(m.from, Square::new(File::E, Rank::R2));
        assert_eq!(m.to, Square::new(File::E, Rank::R4));
        assert_eq!(m.special, Special::None);
        assert_eq!(m.promotion, None);

        assert_eq!(Move::from_uci("e7e8q").unwrap().promotion, Some(Piece::Queen));
        assert_eq!(Move::from_uci("e7e8N").unwrap().promotion, Some(Piece::Knight));
        assert_eq!(Move::from_uci("e7e8r").unwrap().promotion, Some(Piece::Rook));
        assert_eq!(Move::from_uci("e7e8b").unwrap().promotion, Some(Piece::Bishop));
    }

    #[test]
    fn move_from_uci_rejects_garbage() {
        assert!(Move::from_uci("invalid").is_none());
        assert!(Move::from_uci("e2e9").is_none());
        assert!(Move::from_uci("e2").is_none());
        assert!(Move::from_uci("e2e4qq").is_none());
        // Kings and pawns are not promotion choices.
        assert!(Move::from_uci("e7e8k").is_none());
        assert!(Move::from_uci("e7e8p").is_none());
        assert!(Move::from_uci("e7e8x").is_none());
    }

    #[test]
    fn same_squares_ignores_tags() {
        let plain = Move::normal(sq("e1"), sq("g1"));
        let castle = Move::new(sq("e1"), sq("g1"), Special::CastleKingside);
        assert!(plain.same_squares(castle));
        assert_ne!(plain, castle);
    }

    #[test]
    fn special_is_castling() {
        assert!(!Special::None.is_castling());
        assert!(!Special::EnPassant.is_castling());
        assert!(Special::CastleKingside.is_castling());
        assert!(Special::CastleQueenside.is_castling());
    }

    #[test]
    fn move_debug_display() {
        let m = Move::normal(sq("e2"), sq("e4"));
        assert_eq!(format!("{:?}", m), "Move(e2e4)");
        assert_eq!(format!("{}", m), "e2e4");

        let ep = Move::new(sq("e5"), sq("d6"), Special::EnPassant);
        assert_eq!(format!("{:?}", ep), "Move(e5d6, EnPassant)");
    }
}
