//! Move generation.
//!
//! Pseudo-legal moves follow the per-piece movement rules only. Legal
//! moves are the pseudo-legal moves that survive one test: play the move
//! on a scratch copy and check that the mover's king is not attacked.
//! Pins, check evasions, and king safety all fall out of that single test.

mod attacks;
pub mod perft;

use crate::{make_move, Board, GameState};
use chess_core::{CastlingRights, Color, Move, Piece, Special, Square};

pub use attacks::{is_king_attacked, is_square_attacked};
use attacks::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Iterates over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns a mutable slice of the moves, e.g. for sorting.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    /// Returns true if the list holds this exact move.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal moves of the piece on `from`, appending them
/// to `moves`. The moving side is the color of that piece; an empty square
/// yields nothing.
pub fn pseudo_legal_moves_into(
    board: &Board,
    from: Square,
    castling: CastlingRights,
    en_passant: Option<Square>,
    moves: &mut MoveList,
) {
    let Some((piece, us)) = board.piece_at(from) else {
        return;
    };

    match piece {
        Piece::Pawn => generate_pawn_moves(board, from, us, en_passant, moves),
        Piece::Knight => generate_step_moves(board, from, us, &KNIGHT_OFFSETS, moves),
        Piece::Bishop => generate_slider_moves(board, from, us, &DIAGONALS, moves),
        Piece::Rook => generate_slider_moves(board, from, us, &ORTHOGONALS, moves),
        Piece::Queen => {
            generate_slider_moves(board, from, us, &ORTHOGONALS, moves);
            generate_slider_moves(board, from, us, &DIAGONALS, moves);
        }
        Piece::King => {
            generate_step_moves(board, from, us, &KING_OFFSETS, moves);
            generate_castling_moves(board, from, us, castling, moves);
        }
    }
}

/// Returns the pseudo-legal moves of the piece on `from`.
pub fn pseudo_legal_moves(
    board: &Board,
    from: Square,
    castling: CastlingRights,
    en_passant: Option<Square>,
) -> MoveList {
    let mut moves = MoveList::new();
    pseudo_legal_moves_into(board, from, castling, en_passant, &mut moves);
    moves
}

/// Returns the legal moves of the piece on `from`.
///
/// Pieces that do not belong to the side to move have no legal moves.
pub fn legal_moves(state: &GameState, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    if state.board.color_at(from) == Some(state.side_to_move) {
        pseudo_legal_moves_into(
            &state.board,
            from,
            state.castling,
            state.en_passant,
            &mut moves,
        );
        retain_legal(state, &mut moves);
    }
    moves
}

/// Generates all legal moves for the side to move.
pub fn generate_moves(state: &GameState) -> MoveList {
    let mut moves = MoveList::new();
    for from in state.board.squares_of(state.side_to_move) {
        pseudo_legal_moves_into(
            &state.board,
            from,
            state.castling,
            state.en_passant,
            &mut moves,
        );
    }
    retain_legal(state, &mut moves);
    moves
}

/// Filters out moves that leave the mover's king attacked.
fn retain_legal(state: &GameState, moves: &mut MoveList) {
    let us = state.side_to_move;
    moves.retain(|m| {
        let next = make_move(state, *m);
        !is_king_attacked(&next.board, us)
    });
}

/// Returns true if the side to move has at least one legal move.
///
/// Stops at the first legal move found instead of building the full list.
pub fn has_legal_move(state: &GameState) -> bool {
    let mut scratch = MoveList::new();
    for from in state.board.squares_of(state.side_to_move) {
        scratch.clear();
        pseudo_legal_moves_into(
            &state.board,
            from,
            state.castling,
            state.en_passant,
            &mut scratch,
        );
        retain_legal(state, &mut scratch);
        if !scratch.is_empty() {
            return true;
        }
    }
    false
}

/// Returns true if `m` moves a pawn onto its last rank.
pub fn is_promotion(board: &Board, m: Move) -> bool {
    match board.piece_at(m.from) {
        Some((Piece::Pawn, color)) => m.to.rank_index() == color.promotion_rank(),
        _ => false,
    }
}

/// Generates pseudo-legal pawn moves. Moves onto the last rank are emitted
/// once, without a promotion piece.
fn generate_pawn_moves(
    board: &Board,
    from: Square,
    us: Color,
    en_passant: Option<Square>,
    moves: &mut MoveList,
) {
    let dir = us.pawn_direction();

    // Pushes
    if let Some(one) = from.offset(0, dir) {
        if board.is_empty(one) {
            moves.push(Move::normal(from, one));
            if from.rank_index() == us.pawn_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if board.is_empty(two) {
                        moves.push(Move::normal(from, two));
                    }
                }
            }
        }
    }

    // Captures, including en passant onto the recorded target
    for file_delta in [-1, 1] {
        let Some(to) = from.offset(file_delta, dir) else {
            continue;
        };
        match board.color_at(to) {
            Some(color) if color != us => moves.push(Move::normal(from, to)),
            None if en_passant == Some(to) && to.rank_index() == ep_capture_rank(us) => {
                moves.push(Move::new(from, to, Special::EnPassant))
            }
            _ => {}
        }
    }
}

/// Rank index a pawn of `us` lands on when capturing en passant.
const fn ep_capture_rank(us: Color) -> u8 {
    match us {
        Color::White => 5,
        Color::Black => 2,
    }
}

/// Generates knight or king steps onto empty or enemy squares.
fn generate_step_moves(
    board: &Board,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for to in offsets.iter().filter_map(|&(df, dr)| from.offset(df, dr)) {
        if board.color_at(to) != Some(us) {
            moves.push(Move::normal(from, to));
        }
    }
}

/// Casts rays until blocked; the blocking square is included only when it
/// holds an enemy piece.
fn generate_slider_moves(
    board: &Board,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in directions {
        let mut cursor = from;
        while let Some(to) = cursor.offset(df, dr) {
            match board.color_at(to) {
                None => moves.push(Move::normal(from, to)),
                Some(color) => {
                    if color != us {
                        moves.push(Move::normal(from, to));
                    }
                    break;
                }
            }
            cursor = to;
        }
    }
}

/// Castling squares for one side: the king's path plus the squares that
/// must be empty between king and rook.
struct CastlePath {
    rook: Square,
    king_to: Square,
    transit: Square,
    between: &'static [Square],
}

fn castle_path(us: Color, special: Special) -> CastlePath {
    match (us, special) {
        (Color::White, Special::CastleKingside) => CastlePath {
            rook: Square::H1,
            king_to: Square::G1,
            transit: Square::F1,
            between: &[Square::F1, Square::G1],
        },
        (Color::White, _) => CastlePath {
            rook: Square::A1,
            king_to: Square::C1,
            transit: Square::D1,
            between: &[Square::B1, Square::C1, Square::D1],
        },
        (Color::Black, Special::CastleKingside) => CastlePath {
            rook: Square::H8,
            king_to: Square::G8,
            transit: Square::F8,
            between: &[Square::F8, Square::G8],
        },
        (Color::Black, _) => CastlePath {
            rook: Square::A8,
            king_to: Square::C8,
            transit: Square::D8,
            between: &[Square::B8, Square::C8, Square::D8],
        },
    }
}

/// Returns the rook's (from, to) squares for a castling move by `us`.
pub(crate) fn castle_rook_squares(us: Color, special: Special) -> (Square, Square) {
    let path = castle_path(us, special);
    (path.rook, path.transit)
}

/// Generates castling moves. The king must stand on its home square, the
/// right must still be held, the rook must be home, the squares between
/// must be empty, and the king's start, transit, and destination squares
/// must all be unattacked.
fn generate_castling_moves(
    board: &Board,
    from: Square,
    us: Color,
    castling: CastlingRights,
    moves: &mut MoveList,
) {
    let home = match us {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    };
    if from != home {
        return;
    }
    let them = us.opposite();

    for (allowed, special) in [
        (castling.can_castle_kingside(us), Special::CastleKingside),
        (castling.can_castle_queenside(us), Special::CastleQueenside),
    ] {
        if !allowed {
            continue;
        }
        let path = castle_path(us, special);
        if !board.has(path.rook, Piece::Rook, us) {
            continue;
        }
        if !path.between.iter().all(|&sq| board.is_empty(sq)) {
            continue;
        }
        let safe = [home, path.transit, path.king_to]
            .iter()
            .all(|&sq| !is_square_attacked(board, sq, them));
        if safe {
            moves.push(Move::new(home, path.king_to, special));
        }
    }
}
