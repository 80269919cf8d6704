//! Move execution.
//!
//! Both entry points return a new [`GameState`] and leave their input
//! untouched, so a state can be shared freely between search branches.

use crate::movegen::{castle_rook_squares, is_promotion};
use crate::{GameState, RulesError};
use chess_core::{CastlingRights, Color, Move, Piece, Special, Square};

/// Applies a move and returns the resulting state.
///
/// This is the unchecked executor used by the legality filter and the
/// search. The promotion piece is taken from `m.promotion`; a pawn that
/// reaches the last rank without one stays a pawn, which only happens
/// when the legality filter probes an unresolved promotion. A move from
/// an empty square returns the state unchanged. The moved piece keeps its
/// own color, and the turn passes to the other side of the state's mover.
pub fn make_move(state: &GameState, m: Move) -> GameState {
    let mut next = *state;
    let Some((piece, us)) = state.board.piece_at(m.from) else {
        return next;
    };
    let is_capture = !state.board.is_empty(m.to) || m.special == Special::EnPassant;

    next.board.clear(m.from);

    if m.special == Special::EnPassant {
        // The captured pawn sits behind the destination.
        if let Some(captured) = m.to.offset(0, -us.pawn_direction()) {
            next.board.clear(captured);
        }
    }

    let placed = match (piece, m.promotion) {
        (Piece::Pawn, Some(promoted)) if m.to.rank_index() == us.promotion_rank() => promoted,
        _ => piece,
    };
    next.board.set(m.to, placed, us);

    if m.special.is_castling() {
        let (rook_from, rook_to) = castle_rook_squares(us, m.special);
        next.board.clear(rook_from);
        next.board.set(rook_to, Piece::Rook, us);
    }

    // Leaving or landing on a king or rook home square revokes the
    // matching rights for good.
    revoke_castling(&mut next.castling, m.from);
    revoke_castling(&mut next.castling, m.to);

    next.en_passant = if piece == Piece::Pawn && m.from.rank_index().abs_diff(m.to.rank_index()) == 2
    {
        m.from.offset(0, us.pawn_direction())
    } else {
        None
    };

    if piece == Piece::Pawn || is_capture {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }
    if state.side_to_move == Color::Black {
        next.fullmove_number += 1;
    }

    next.side_to_move = state.side_to_move.opposite();
    next
}

fn revoke_castling(rights: &mut CastlingRights, sq: Square) {
    match sq {
        Square::E1 => rights.remove_color(Color::White),
        Square::E8 => rights.remove_color(Color::Black),
        Square::H1 => rights.remove_kingside(Color::White),
        Square::A1 => rights.remove_queenside(Color::White),
        Square::H8 => rights.remove_kingside(Color::Black),
        Square::A8 => rights.remove_queenside(Color::Black),
        _ => {}
    }
}

/// Applies a move at the caller boundary.
///
/// `promotion` overrides any piece already attached to the move. The move
/// is trusted to be legal: callers validate it against
/// [`legal_moves`](crate::legal_moves) first, or use
/// [`Game::play`](crate::Game::play), which does.
///
/// # Errors
///
/// - [`RulesError::EmptySquare`] if nothing stands on `m.from`.
/// - [`RulesError::InvalidPromotionChoice`] for a king or pawn choice.
/// - [`RulesError::PromotionRequired`] if a pawn reaches the last rank and
///   no piece was chosen. The executor never picks one silently.
pub fn apply(state: &GameState, m: Move, promotion: Option<Piece>) -> Result<GameState, RulesError> {
    if state.board.is_empty(m.from) {
        return Err(RulesError::EmptySquare(m.from));
    }

    let choice = promotion.or(m.promotion);
    if let Some(piece) = choice {
        if !piece.is_promotion_choice() {
            return Err(RulesError::InvalidPromotionChoice(piece));
        }
    }

    let resolved = if is_promotion(&state.board, m) {
        let piece = choice.ok_or(RulesError::PromotionRequired(m))?;
        m.with_promotion(piece)
    } else {
        Move {
            promotion: None,
            ..m
        }
    };

    Ok(make_move(state, resolved))
}
