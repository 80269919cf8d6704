//! Game management at the caller boundary.
//!
//! The [`Game`] struct owns the authoritative [`GameState`] and the list of
//! moves played so far. It is the place where moves coming from a user are
//! validated: anything not in the legal move set of its origin square is
//! rejected, never coerced into a nearby legal move.

use crate::movegen::{is_promotion, legal_moves};
use crate::rules::{status, GameStatus};
use crate::{apply, GameState, MoveList, PositionError, RulesError};
use chess_core::{Move, Piece, Square};

/// A recorded move in game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    /// The move as played, with its promotion piece resolved.
    pub mov: Move,
    /// The state before the move.
    pub before: GameState,
}

/// A chess game with history tracking.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    history: Vec<GameMove>,
}

impl Game {
    /// Creates a new game from the starting position.
    pub fn new() -> Self {
        Self::from_state(GameState::startpos())
    }

    /// Creates a game from an existing state.
    pub fn from_state(state: GameState) -> Self {
        Game {
            state,
            history: Vec::new(),
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Ok(Self::from_state(GameState::from_fen(fen)?))
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[GameMove] {
        &self.history
    }

    /// Returns the legal moves of the piece on `from`.
    pub fn legal_moves(&self, from: Square) -> MoveList {
        legal_moves(&self.state, from)
    }

    /// Returns the current game status.
    pub fn status(&self) -> GameStatus {
        status(&self.state)
    }

    /// Plays a move after checking it against the legal moves of its
    /// origin square.
    ///
    /// The move must match a generated move exactly, including its
    /// `special` tag. Promotion pieces are resolved by [`apply`]: the
    /// `promotion` argument wins over a piece already on the move.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::IllegalMoveRequested`] if the move is not legal,
    /// or any error [`apply`] reports for the promotion choice.
    pub fn play(&mut self, m: Move, promotion: Option<Piece>) -> Result<&GameState, RulesError> {
        let candidate = Move {
            promotion: None,
            ..m
        };
        if !legal_moves(&self.state, m.from).contains(&candidate) {
            return Err(RulesError::IllegalMoveRequested(m));
        }

        let before = self.state;
        let next = apply(&before, m, promotion)?;
        let recorded = if is_promotion(&before.board, candidate) {
            match next.piece_at(m.to) {
                Some((piece, _)) => candidate.with_promotion(piece),
                None => candidate,
            }
        } else {
            candidate
        };
        self.history.push(GameMove {
            mov: recorded,
            before,
        });
        self.state = next;
        Ok(&self.state)
    }

    /// Plays a move given in long algebraic notation (e.g. "e2e4", "e7e8q").
    ///
    /// The special tag is looked up among the legal moves of the origin
    /// square, so "e1g1" castles when castling is legal.
    pub fn play_uci(&mut self, uci: &str) -> Result<&GameState, RulesError> {
        let parsed =
            Move::from_uci(uci).ok_or_else(|| RulesError::UnparsableMove(uci.to_string()))?;
        let matched = legal_moves(&self.state, parsed.from)
            .as_slice()
            .iter()
            .copied()
            .find(|m| m.same_squares(parsed))
            .ok_or(RulesError::IllegalMoveRequested(parsed))?;
        self.play(matched, parsed.promotion)
    }

    /// Takes back the last move. Returns the move, or `None` at the start.
    pub fn undo(&mut self) -> Option<Move> {
        let last = self.history.pop()?;
        self.state = last.before;
        Some(last.mov)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
