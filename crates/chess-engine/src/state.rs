//! Game state: board plus the side to move and the rights that depend on
//! move history.

use chess_core::{CastlingRights, Color, FenRecord, Piece, Square};

use crate::{is_king_attacked, Board, PositionError};

/// Complete chess game state.
///
/// `GameState` is a small `Copy` value. Move application never mutates a
/// state in place; it always returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// Square a pawn may capture onto en passant. Only set for the ply
    /// right after a two-square pawn advance.
    pub en_passant: Option<Square>,

    /// Half-moves since the last capture or pawn move. Bookkeeping for FEN
    /// only: no draw rule reads it.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl GameState {
    /// Creates a state from its parts, with fresh clocks. The position is
    /// not checked; see [`GameState::try_new`].
    pub fn new(
        board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> Self {
        GameState {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates a state from its parts, with fresh clocks, rejecting
    /// positions no legal game can reach.
    ///
    /// # Errors
    ///
    /// - [`PositionError::KingCount`] unless each side has exactly one king.
    /// - [`PositionError::OpponentInCheck`] if the side not to move is in
    ///   check.
    pub fn try_new(
        board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> Result<Self, PositionError> {
        validate(&board, side_to_move)?;
        Ok(Self::new(board, side_to_move, castling, en_passant))
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        let record = FenRecord::default();
        Self::from_record(&record).expect("STARTPOS is valid")
    }

    /// Creates a state from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let record = FenRecord::parse(fen)?;
        Self::from_record(&record)
    }

    /// Creates a state from a parsed FEN record, with the same checks as
    /// [`GameState::try_new`].
    pub fn from_record(record: &FenRecord) -> Result<Self, PositionError> {
        let board = Board::from_pieces(record.pieces.iter().copied());
        validate(&board, record.side_to_move)?;

        Ok(GameState {
            board,
            side_to_move: record.side_to_move,
            castling: record.castling,
            en_passant: record.en_passant,
            halfmove_clock: record.halfmove_clock,
            fullmove_number: record.fullmove_number,
        })
    }

    /// Converts the state to a FEN record.
    pub fn to_record(&self) -> FenRecord {
        let mut pieces: Vec<_> = self.board.pieces().collect();
        pieces.sort_by_key(|(sq, _, _)| (sq.row(), sq.col()));
        FenRecord {
            pieces,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Converts the state to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_record().to_fen()
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.board.piece_at(sq)
    }

    /// Returns the square of the given side's king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board.king_square(color)
    }
}

fn validate(board: &Board, side_to_move: Color) -> Result<(), PositionError> {
    for color in Color::BOTH {
        let count = board.count(Piece::King, color);
        if count != 1 {
            return Err(PositionError::KingCount { color, count });
        }
    }
    let waiting = side_to_move.opposite();
    if is_king_attacked(board, waiting) {
        return Err(PositionError::OpponentInCheck { color: waiting });
    }
    Ok(())
}

impl Default for GameState {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_fen_roundtrip() {
        let state = GameState::startpos();
        assert_eq!(state.to_fen(), FenRecord::STARTPOS);
        assert_eq!(state.castling, CastlingRights::ALL);
        assert_eq!(state.en_passant, None);
        assert_eq!(state.side_to_move, Color::White);
    }

    #[test]
    fn custom_fen_roundtrip() {
        for fen in [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1",
        ] {
            let state = GameState::from_fen(fen).unwrap();
            assert_eq!(state.to_fen(), fen);
        }
    }

    #[test]
    fn piece_at() {
        let state = GameState::startpos();
        assert_eq!(state.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(state.piece_at(Square::E8), Some((Piece::King, Color::Black)));
        assert_eq!(state.piece_at(Square::from_algebraic("e4").unwrap()), None);
        assert_eq!(state.board.count(Piece::Pawn, Color::White), 8);
        assert_eq!(state.board.count(Piece::Pawn, Color::Black), 8);
    }

    #[test]
    fn rejects_missing_or_extra_kings() {
        assert_eq!(
            GameState::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(PositionError::KingCount {
                color: Color::Black,
                count: 0
            })
        );
        assert_eq!(
            GameState::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(PositionError::KingCount {
                color: Color::White,
                count: 2
            })
        );
    }

    #[test]
    fn rejects_side_not_to_move_in_check() {
        assert_eq!(
            GameState::from_fen("4k3/8/8/8/8/8/4R3/4K3 w - - 0 1"),
            Err(PositionError::OpponentInCheck {
                color: Color::Black
            })
        );
        // Same board with Black to move is an ordinary check.
        assert!(GameState::from_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1").is_ok());
    }

    #[test]
    fn try_new_checks_the_position() {
        let legal = GameState::from_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1").unwrap();
        assert_eq!(
            GameState::try_new(legal.board, Color::Black, CastlingRights::NONE, None),
            Ok(GameState::new(legal.board, Color::Black, CastlingRights::NONE, None))
        );
        assert_eq!(
            GameState::try_new(legal.board, Color::White, CastlingRights::NONE, None),
            Err(PositionError::OpponentInCheck {
                color: Color::Black
            })
        );

        let mut kingless = legal.board;
        kingless.clear(Square::E8);
        assert_eq!(
            GameState::try_new(kingless, Color::White, CastlingRights::NONE, None),
            Err(PositionError::KingCount {
                color: Color::Black,
                count: 0
            })
        );
    }

    #[test]
    fn surfaces_fen_errors() {
        assert!(matches!(
            GameState::from_fen("not a fen"),
            Err(PositionError::Fen(_))
        ));
    }
}
