//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Promotions come out of the generator unresolved, so perft expands each
//! of them into the four promotion pieces to match the published counts.

use super::{generate_moves, is_promotion, MoveList};
use crate::{make_move, GameState};
use chess_core::{Move, Piece};

/// Expands unresolved promotions into one move per promotion piece.
fn expanded(state: &GameState, moves: &MoveList) -> Vec<Move> {
    let mut out = Vec::with_capacity(moves.len());
    for &m in moves {
        if is_promotion(&state.board, m) {
            out.extend(Piece::PROMOTIONS.iter().map(|&p| m.with_promotion(p)));
        } else {
            out.push(m);
        }
    }
    out
}

/// Counts the number of leaf nodes at the given depth.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = expanded(state, &generate_moves(state));
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&m| perft(&make_move(state, m), depth - 1))
        .sum()
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(state: &GameState, depth: u32) -> Vec<(String, u64)> {
    let moves = expanded(state, &generate_moves(state));
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|&m| {
            let nodes = if depth > 1 {
                perft(&make_move(state, m), depth - 1)
            } else {
                1
            };
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
