//! Static evaluation: material plus piece-square tables.

use chess_core::{Color, Piece, Square};
use chess_engine::Board;

/// Piece values in centipawns
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;

/// Below this much non-king material (both sides together) the king switches
/// to the endgame table.
const ENDGAME_MATERIAL: i32 = 2600;

// Piece-square tables from white's point of view, laid out as the board is
// seen from white's side: the first row is rank 8, the last row is rank 1.

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    50,  50,  50,  50,  50,  50,  50,  50,
    10,  10,  20,  30,  30,  20,  10,  10,
     5,   5,  10,  25,  25,  10,   5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     5,  10,  10, -20, -20,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10,  10,  10,  10,  10,   5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   0,   5,   5,   5,   5,   0,  -5,
    -10,   5,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_MIDDLEGAME_PST: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

#[rustfmt::skip]
const KING_ENDGAME_PST: [i32; 64] = [
    -50, -40, -30, -20, -20, -30, -40, -50,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -50, -30, -30, -30, -30, -30, -30, -50,
];

/// Returns the material value of a piece in centipawns. Kings are worth 0.
pub const fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => 0,
    }
}

/// Table index for `sq`, mirrored vertically for black.
fn table_index(sq: Square, color: Color) -> usize {
    let row = match color {
        Color::White => sq.row(),
        Color::Black => 7 - sq.row(),
    };
    row as usize * 8 + sq.col() as usize
}

/// Evaluates the board in centipawns. Positive favors white.
pub fn evaluate(board: &Board) -> i32 {
    let material: i32 = board.pieces().map(|(_, piece, _)| piece_value(piece)).sum();
    let king_table = if material < ENDGAME_MATERIAL {
        &KING_ENDGAME_PST
    } else {
        &KING_MIDDLEGAME_PST
    };

    board
        .pieces()
        .map(|(sq, piece, color)| {
            let idx = table_index(sq, color);
            let positional = match piece {
                Piece::Pawn => PAWN_PST[idx],
                Piece::Knight => KNIGHT_PST[idx],
                Piece::Bishop => BISHOP_PST[idx],
                Piece::Rook => ROOK_PST[idx],
                Piece::Queen => QUEEN_PST[idx],
                Piece::King => king_table[idx],
            };
            let value = piece_value(piece) + positional;
            match color {
                Color::White => value,
                Color::Black => -value,
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::GameState;

    fn eval(fen: &str) -> i32 {
        evaluate(&GameState::from_fen(fen).unwrap().board)
    }

    #[test]
    fn startpos_is_balanced() {
        assert_eq!(evaluate(&GameState::startpos().board), 0);
    }

    #[test]
    fn mirrored_positions_negate() {
        let white = eval("4k3/8/8/8/3N4/8/PP6/4K3 w - - 0 1");
        let black = eval("4k3/pp6/8/3n4/8/8/8/4K3 w - - 0 1");
        assert_eq!(white, -black);
        assert!(white > 0);
    }

    #[test]
    fn material_dominates() {
        assert!(eval("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1") > 800);
        assert!(eval("q3k3/8/8/8/8/8/8/4K3 w - - 0 1") < -800);
    }

    #[test]
    fn central_knight_beats_rim_knight() {
        let center = eval("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1");
        let rim = eval("4k3/8/8/8/N7/8/8/4K3 w - - 0 1");
        assert!(center > rim);
    }

    #[test]
    fn advanced_pawns_score_higher() {
        let seventh = eval("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let second = eval("4k3/8/8/8/8/8/P7/4K3 w - - 0 1");
        assert!(seventh > second);
    }

    #[test]
    fn king_table_depends_on_material() {
        // Bare kings: the endgame table prefers a central king.
        let central = eval("k7/8/8/8/4K3/8/8/8 w - - 0 1");
        let corner = eval("k7/8/8/8/8/8/8/7K w - - 0 1");
        assert!(central > corner);

        // With queens and rooks on, a castled king beats a central one.
        let castled = eval("r2qk2r/8/8/8/8/8/8/R2Q1RK1 w - - 0 1");
        let exposed = eval("r2qk2r/8/8/8/4K3/8/8/R2Q3R w - - 0 1");
        assert!(castled > exposed);
    }

    #[test]
    fn piece_values() {
        assert_eq!(piece_value(Piece::Pawn), 100);
        assert_eq!(piece_value(Piece::Queen), 900);
        assert_eq!(piece_value(Piece::King), 0);
    }
}
