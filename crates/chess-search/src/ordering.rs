//! Move ordering heuristics for alpha-beta.
//!
//! Good moves first means earlier cutoffs. Captures are ranked most valuable
//! victim first, least valuable attacker first; promotions and castling get
//! fixed bonuses and central destinations a small one.

use crate::eval::piece_value;
use chess_core::{File, Move, Piece, Rank, Special, Square};
use chess_engine::{is_promotion, Board};
use std::cmp::Reverse;

const CAPTURE_BASE: i32 = 10_000;
const PROMOTION_BONUS: i32 = 9_000;
const CASTLING_BONUS: i32 = 500;
const CENTER_BONUS: i32 = 10;

const CENTER: [Square; 4] = [
    Square::new(File::D, Rank::R4),
    Square::new(File::E, Rank::R4),
    Square::new(File::D, Rank::R5),
    Square::new(File::E, Rank::R5),
];

/// Scores a move for ordering. Higher is searched first.
pub fn score_move(board: &Board, m: Move) -> i32 {
    let mut score = 0;

    let victim = if m.special == Special::EnPassant {
        Some(Piece::Pawn)
    } else {
        board.piece_at(m.to).map(|(piece, _)| piece)
    };
    if let Some(victim) = victim {
        let attacker = board.piece_at(m.from).map_or(0, |(piece, _)| piece_value(piece));
        score += CAPTURE_BASE + piece_value(victim) - attacker;
    }

    if m.promotion.is_some() || is_promotion(board, m) {
        score += PROMOTION_BONUS;
    }
    if m.special.is_castling() {
        score += CASTLING_BONUS;
    }
    if CENTER.contains(&m.to) {
        score += CENTER_BONUS;
    }

    score
}

/// Sorts `moves` best first. `first`, if present in the list, is moved to the
/// front regardless of its score. Equal scores keep their generation order.
pub fn order_moves(board: &Board, moves: &mut [Move], first: Option<Move>) {
    moves.sort_by_cached_key(|&m| {
        let pinned = Some(m) == first;
        (Reverse(pinned), Reverse(score_move(board, m)))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::{generate_moves, GameState};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(fen: &str) -> Board {
        GameState::from_fen(fen).unwrap().board
    }

    #[test]
    fn center_squares() {
        let names: Vec<String> = CENTER.iter().map(|s| s.to_algebraic()).collect();
        assert_eq!(names, ["d4", "e4", "d5", "e5"]);
    }

    #[test]
    fn most_valuable_victim_least_valuable_attacker() {
        // White pawn and queen can both take the black queen on d5; the
        // queen can also take a pawn on a7.
        let b = board("4k3/p7/8/3q4/4P3/8/Q7/4K3 w - - 0 1");
        let pawn_takes_queen = score_move(&b, Move::normal(sq("e4"), sq("d5")));
        let queen_takes_queen = score_move(&b, Move::normal(sq("a2"), sq("d5")));
        let queen_takes_pawn = score_move(&b, Move::normal(sq("a2"), sq("a7")));
        let quiet = score_move(&b, Move::normal(sq("e1"), sq("f1")));

        assert!(pawn_takes_queen > queen_takes_pawn);
        assert!(queen_takes_pawn > quiet);
        assert!(queen_takes_queen < pawn_takes_queen);
    }

    #[test]
    fn en_passant_counts_as_capture() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let ep = Move::new(sq("e5"), sq("d6"), Special::EnPassant);
        assert_eq!(score_move(&b, ep), CAPTURE_BASE);
    }

    #[test]
    fn promotion_and_castling_bonuses() {
        let b = board("4k3/P7/8/8/8/8/8/4K2R w K - 0 1");
        assert_eq!(score_move(&b, Move::normal(sq("a7"), Square::A8)), PROMOTION_BONUS);
        let castle = Move::new(Square::E1, Square::G1, Special::CastleKingside);
        assert_eq!(score_move(&b, castle), CASTLING_BONUS);
    }

    #[test]
    fn order_puts_captures_first_and_honors_first_move() {
        let state = GameState::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mut moves: Vec<Move> = generate_moves(&state).iter().copied().collect();

        order_moves(&state.board, &mut moves, None);
        assert_eq!(moves[0], Move::normal(sq("e4"), sq("d5")));

        let king_move = Move::normal(Square::E1, sq("f2"));
        order_moves(&state.board, &mut moves, Some(king_move));
        assert_eq!(moves[0], king_move);
        assert_eq!(moves[1], Move::normal(sq("e4"), sq("d5")));
    }

    #[test]
    fn order_is_stable_for_equal_scores() {
        let state = GameState::startpos();
        let generated: Vec<Move> = generate_moves(&state).iter().copied().collect();
        let mut moves = generated.clone();
        order_moves(&state.board, &mut moves, None);

        assert_eq!(moves.len(), generated.len());
        for pair in moves.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(score_move(&state.board, a) >= score_move(&state.board, b));
            if score_move(&state.board, a) == score_move(&state.board, b) {
                let pos = |m| generated.iter().position(|&g| g == m).unwrap();
                assert!(pos(a) < pos(b), "{a:?} before {b:?}");
            }
        }
    }
}
