//! Square attack detection on the mailbox board.

use crate::Board;
use chess_core::{Color, Piece, Square};

/// Knight jumps as (file, rank) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
];

/// King steps as (file, rank) deltas.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Rook ray directions.
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Bishop ray directions.
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Returns true if the given square is attacked by the given color.
///
/// Pawns, knights, kings, and sliders are tested independently. A slider
/// ray stops at the first occupied square, which counts only if it holds
/// an attacker of a matching kind.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    // An attacking pawn sits one rank behind the target, from its own
    // point of view, on an adjacent file.
    let pawn_rank = -by_color.pawn_direction();
    for file_delta in [-1, 1] {
        if let Some(from) = sq.offset(file_delta, pawn_rank) {
            if board.has(from, Piece::Pawn, by_color) {
                return true;
            }
        }
    }

    if KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(df, dr)| sq.offset(df, dr))
        .any(|from| board.has(from, Piece::Knight, by_color))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .filter_map(|&(df, dr)| sq.offset(df, dr))
        .any(|from| board.has(from, Piece::King, by_color))
    {
        return true;
    }

    slider_attacks(board, sq, by_color, &ORTHOGONALS, Piece::Rook)
        || slider_attacks(board, sq, by_color, &DIAGONALS, Piece::Bishop)
}

/// Casts rays from `sq` and reports whether the first piece met along any
/// of them is an enemy `kind` or queen.
fn slider_attacks(
    board: &Board,
    sq: Square,
    by_color: Color,
    directions: &[(i8, i8)],
    kind: Piece,
) -> bool {
    for &(df, dr) in directions {
        let mut cursor = sq;
        while let Some(next) = cursor.offset(df, dr) {
            if let Some((piece, color)) = board.piece_at(next) {
                if color == by_color && (piece == kind || piece == Piece::Queen) {
                    return true;
                }
                break;
            }
            cursor = next;
        }
    }
    false
}

/// Returns true if the king of the given color is attacked.
///
/// A board without that king reports `false`.
pub fn is_king_attacked(board: &Board, king_color: Color) -> bool {
    match board.king_square(king_color) {
        Some(king_sq) => is_square_attacked(board, king_sq, king_color.opposite()),
        None => false,
    }
}
