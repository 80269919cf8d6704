//! Iterative deepening minimax with alpha-beta pruning.
//!
//! Scores are always from white's point of view: white maximizes, black
//! minimizes. Each iteration either completes and replaces the previous
//! result, or runs past the deadline and is thrown away.

use crate::config::SearchConfig;
use crate::eval::evaluate;
use crate::ordering::order_moves;
use chess_core::{Color, Move, Piece};
use chess_engine::{generate_moves, is_king_attacked, is_promotion, make_move, GameState};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Score of being checkmated at the root. Mates further away score
/// closer to zero, one point per ply.
pub const MATE: i32 = 100_000;

/// Bound larger than any reachable score.
pub const INF: i32 = 1_000_000;

/// Outcome of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` only if the position has no legal move.
    pub best_move: Option<Move>,
    /// Deepest fully completed iteration.
    pub depth_reached: u32,
    /// Score of `best_move` in centipawns, positive favors white.
    pub score: i32,
    /// Wall-clock time spent searching.
    pub elapsed_ms: u64,
    /// Nodes visited across all iterations, including an aborted one.
    pub nodes: u64,
}

/// Search state
pub struct Searcher<R> {
    rng: R,
    max_depth: u32,
    node_check_interval: u64,
    nodes: u64,
    iteration: u32,
    deadline: Instant,
    stopped: bool,
}

impl Searcher<StdRng> {
    /// Creates a searcher from configuration, seeding tie-breaks from
    /// `config.seed` or from the OS when unset.
    pub fn from_config(config: &SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Searcher::new(rng)
            .with_max_depth(config.max_depth)
            .with_node_check_interval(config.node_check_interval)
    }
}

impl<R: Rng> Searcher<R> {
    /// Creates a searcher with default limits using `rng` for tie-breaks.
    pub fn new(rng: R) -> Self {
        let defaults = SearchConfig::default();
        Searcher {
            rng,
            max_depth: defaults.max_depth,
            node_check_interval: defaults.node_check_interval,
            nodes: 0,
            iteration: 0,
            deadline: Instant::now(),
            stopped: false,
        }
    }

    /// Caps iterative deepening at `depth` (at least 1).
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Sets how many nodes pass between deadline checks (at least 1).
    pub fn with_node_check_interval(mut self, interval: u64) -> Self {
        self.node_check_interval = interval.max(1);
        self
    }

    /// Searches `state` until the depth cap is reached or `time_limit`
    /// passes, returning the result of the last completed iteration.
    ///
    /// Depth 1 is never interrupted, so a move is returned whenever one
    /// exists. The state is only read.
    pub fn search(&mut self, state: &GameState, time_limit: Duration) -> SearchResult {
        let start = Instant::now();
        self.deadline = start + time_limit;
        self.nodes = 0;
        self.stopped = false;

        let mut root: Vec<Move> = generate_moves(state)
            .iter()
            .map(|&m| queen_promotion(state, m))
            .collect();

        let mut result = SearchResult {
            best_move: None,
            depth_reached: 0,
            score: terminal_score(state, 0),
            elapsed_ms: 0,
            nodes: 0,
        };
        if root.is_empty() {
            result.elapsed_ms = elapsed_ms(start);
            return result;
        }

        order_moves(&state.board, &mut root, None);

        for depth in 1..=self.max_depth {
            self.iteration = depth;
            match self.search_root(state, depth, &root) {
                Some((best, score)) => {
                    debug!(depth, score, nodes = self.nodes, best = %best, "iteration complete");
                    result.best_move = Some(best);
                    result.score = score;
                    result.depth_reached = depth;
                    order_moves(&state.board, &mut root, Some(best));

                    if score.abs() >= MATE - depth as i32 {
                        break;
                    }
                }
                None => {
                    debug!(depth, nodes = self.nodes, "iteration aborted at deadline");
                    break;
                }
            }
            if Instant::now() >= self.deadline {
                break;
            }
        }

        result.nodes = self.nodes;
        result.elapsed_ms = elapsed_ms(start);
        info!(
            depth = result.depth_reached,
            score = result.score,
            nodes = result.nodes,
            elapsed_ms = result.elapsed_ms,
            best = ?result.best_move.map(Move::to_uci),
            "search finished"
        );
        result
    }

    /// Searches every root move to `depth`. Returns `None` if the deadline
    /// interrupted the iteration.
    fn search_root(&mut self, state: &GameState, depth: u32, moves: &[Move]) -> Option<(Move, i32)> {
        let maximizing = state.side_to_move == Color::White;
        let mut best_score = if maximizing { -INF } else { INF };
        let mut best: Vec<Move> = Vec::new();

        for (i, &m) in moves.iter().enumerate() {
            let child = make_move(state, m);
            // Windows one point past the current best keep ties exact.
            let (alpha, beta) = match (i, maximizing) {
                (0, _) => (-INF, INF),
                (_, true) => (best_score - 1, INF),
                (_, false) => (-INF, best_score + 1),
            };
            let score = self.minimax(&child, depth - 1, 1, alpha, beta);
            if self.stopped {
                return None;
            }

            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves {
                best_score = score;
                best.clear();
                best.push(m);
            } else if score == best_score {
                best.push(m);
            }
        }

        let pick = *best.choose(&mut self.rng)?;
        Some((pick, best_score))
    }

    fn minimax(&mut self, state: &GameState, depth: u32, ply: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;
        self.check_time();
        if self.stopped {
            return 0;
        }

        let mut moves = generate_moves(state);
        if moves.is_empty() {
            return terminal_score(state, ply);
        }
        if depth == 0 {
            return evaluate(&state.board);
        }

        order_moves(&state.board, moves.as_mut_slice(), None);

        if state.side_to_move == Color::White {
            let mut best = -INF;
            for &m in moves.iter() {
                let child = make_move(state, queen_promotion(state, m));
                let score = self.minimax(&child, depth - 1, ply + 1, alpha, beta);
                if self.stopped {
                    return 0;
                }
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INF;
            for &m in moves.iter() {
                let child = make_move(state, queen_promotion(state, m));
                let score = self.minimax(&child, depth - 1, ply + 1, alpha, beta);
                if self.stopped {
                    return 0;
                }
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    fn check_time(&mut self) {
        if self.iteration >= 2
            && self.nodes % self.node_check_interval == 0
            && Instant::now() >= self.deadline
        {
            self.stopped = true;
        }
    }
}

/// Score of a position with no legal moves, `ply` half-moves from the root.
fn terminal_score(state: &GameState, ply: u32) -> i32 {
    if !is_king_attacked(&state.board, state.side_to_move) {
        return 0;
    }
    let mate = MATE - ply as i32;
    match state.side_to_move {
        Color::White => -mate,
        Color::Black => mate,
    }
}

fn queen_promotion(state: &GameState, m: Move) -> Move {
    if is_promotion(&state.board, m) {
        m.with_promotion(Piece::Queen)
    } else {
        m
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;
    use chess_engine::{status, GameStatus};

    fn searcher(seed: u64, depth: u32) -> Searcher<StdRng> {
        Searcher::new(StdRng::seed_from_u64(seed)).with_max_depth(depth)
    }

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).unwrap()
    }

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    const LONG: Duration = Duration::from_secs(60);

    #[test]
    fn finds_mate_in_one_for_white() {
        let s = state("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1");
        let result = searcher(1, 4).search(&s, LONG);
        assert_eq!(result.best_move, Some(Move::normal(Square::A1, Square::A8)));
        assert_eq!(result.score, MATE - 1);
        assert_eq!(result.depth_reached, 1);
    }

    #[test]
    fn finds_mate_in_one_for_black() {
        let s = state("r3k3/8/8/8/8/8/5PPP/6K1 b - - 0 1");
        let result = searcher(1, 4).search(&s, LONG);
        assert_eq!(result.best_move, Some(Move::normal(Square::A8, Square::A1)));
        assert_eq!(result.score, -(MATE - 1));
    }

    #[test]
    fn takes_a_free_queen() {
        let s = state("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
        let result = searcher(3, 3).search(&s, LONG);
        assert_eq!(result.best_move, Some(Move::normal(sq("e4"), sq("d5"))));
        assert!(result.score > 0);
    }

    #[test]
    fn promotes_to_queen() {
        let s = state("7k/P7/8/8/8/8/8/K7 w - - 0 1");
        let result = searcher(0, 2).search(&s, LONG);
        assert_eq!(
            result.best_move,
            Some(Move::normal(sq("a7"), Square::A8).with_promotion(Piece::Queen))
        );
    }

    #[test]
    fn no_move_when_game_is_over() {
        let mated = state("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(status(&mated), GameStatus::Checkmate);
        let result = searcher(0, 4).search(&mated, LONG);
        assert_eq!(result.best_move, None);
        assert_eq!(result.depth_reached, 0);
        assert_eq!(result.score, -MATE);

        let stalemate = state("k7/8/1Q6/8/8/8/8/4K3 b - - 0 1");
        let result = searcher(0, 4).search(&stalemate, LONG);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn zero_time_still_completes_depth_one() {
        let result = searcher(9, 32).search(&GameState::startpos(), Duration::ZERO);
        assert!(result.best_move.is_some());
        assert_eq!(result.depth_reached, 1);
    }

    #[test]
    fn depth_cap_is_respected() {
        let result = searcher(2, 2).search(&GameState::startpos(), LONG);
        assert_eq!(result.depth_reached, 2);
        assert!(result.nodes > 20);
    }

    #[test]
    fn same_seed_same_result() {
        let s = GameState::startpos();
        let a = searcher(42, 3).search(&s, LONG);
        let b = searcher(42, 3).search(&s, LONG);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn tie_breaks_vary_with_seed() {
        // Bare kings: every king move scores the same at depth 1.
        let s = state("k7/8/8/8/4K3/8/8/8 w - - 0 1");
        let picks: std::collections::HashSet<Move> = (0..32)
            .filter_map(|seed| searcher(seed, 1).search(&s, LONG).best_move)
            .collect();
        assert!(picks.len() > 1);
    }

    #[test]
    fn search_leaves_state_untouched() {
        let s = state("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let snapshot = s;
        searcher(5, 2).search(&s, LONG);
        assert_eq!(s, snapshot);
    }

    #[test]
    fn terminal_scores() {
        let mated = state("R5k1/5ppp/8/8/8/8/8/4K3 b - - 0 1");
        assert_eq!(terminal_score(&mated, 3), MATE - 3);
        let stalemate = state("k7/8/1Q6/8/8/8/8/4K3 b - - 0 1");
        assert_eq!(terminal_score(&stalemate, 3), 0);
    }
}
