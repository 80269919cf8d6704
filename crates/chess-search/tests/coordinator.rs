//! Coordinator behavior under a real tokio runtime.

use chess_core::{CastlingRights, Color, Square};
use chess_engine::{legal_moves, status, GameState, GameStatus, PositionError};
use chess_search::{SearchConfig, SearchCoordinator, SearchRequest};
use std::time::{Duration, Instant};

fn config(seed: u64) -> SearchConfig {
    SearchConfig {
        seed: Some(seed),
        ..SearchConfig::default()
    }
}

/// Slack on top of the time budget for thread handoff and the last
/// stretch of nodes before a deadline check.
const SLACK: Duration = Duration::from_millis(500);

#[tokio::test]
async fn answers_within_time_budget() {
    let coordinator = SearchCoordinator::spawn(config(1));
    let start = Instant::now();
    let response = coordinator
        .search(SearchRequest::new(GameState::startpos(), 200))
        .await
        .unwrap();
    let waited = start.elapsed();

    assert!(waited < Duration::from_millis(200) + SLACK, "took {waited:?}");
    assert!(response.result.depth_reached >= 1);
    let best = response.result.best_move.unwrap();
    assert!(legal_moves(&GameState::startpos(), best.from).contains(&best));
}

#[tokio::test]
async fn tiny_budget_still_returns_a_move() {
    let coordinator = SearchCoordinator::spawn(config(2));
    let kiwipete =
        GameState::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    assert_eq!(status(&kiwipete), GameStatus::Ongoing);

    for budget in [0, 1, 5] {
        let response = coordinator
            .search(SearchRequest::new(kiwipete, budget))
            .await
            .unwrap();
        assert!(response.result.best_move.is_some(), "budget {budget}ms");
    }
}

#[tokio::test]
async fn finished_game_returns_no_move() {
    let coordinator = SearchCoordinator::spawn(config(3));
    let stalemate = GameState::from_fen("k7/8/1Q6/8/8/8/8/4K3 b - - 0 1").unwrap();
    let response = coordinator
        .search(SearchRequest::new(stalemate, 50))
        .await
        .unwrap();
    assert_eq!(response.result.best_move, None);
}

#[tokio::test]
async fn request_ids_increase_and_match_responses() {
    let coordinator = SearchCoordinator::spawn(config(4));
    let first = coordinator
        .submit(SearchRequest::new(GameState::startpos(), 20))
        .await
        .unwrap();
    let second = coordinator
        .submit(SearchRequest::new(GameState::startpos(), 20))
        .await
        .unwrap();
    assert!(second.id() > first.id());

    let (first_id, second_id) = (first.id(), second.id());
    let second_response = second.wait().await.unwrap();
    let first_response = first.wait().await.unwrap();
    assert_eq!(first_response.id, first_id);
    assert_eq!(second_response.id, second_id);
}

#[tokio::test]
async fn caller_keeps_running_while_search_runs() {
    let coordinator = SearchCoordinator::spawn(config(5));
    let pending = coordinator
        .submit(SearchRequest::new(GameState::startpos(), 300))
        .await
        .unwrap();

    // The submitting task is free to do other work in the meantime.
    let mut ticks = 0u32;
    let _ = tokio::time::timeout(Duration::from_millis(100), async {
        loop {
            tokio::time::sleep(Duration::from_millis(10)).await;
            ticks += 1;
        }
    })
    .await;
    assert!(ticks >= 3, "only {ticks} ticks");

    let response = pending.wait().await.unwrap();
    assert!(response.result.best_move.is_some());
}

#[tokio::test]
async fn same_seed_and_depth_cap_is_deterministic() {
    let fixed = SearchConfig {
        seed: Some(11),
        max_depth: 3,
        ..SearchConfig::default()
    };
    let request = SearchRequest::new(GameState::startpos(), 60_000);

    let a = SearchCoordinator::spawn(fixed.clone())
        .search(request)
        .await
        .unwrap();
    let b = SearchCoordinator::spawn(fixed).search(request).await.unwrap();
    assert_eq!(a.result.best_move, b.result.best_move);
    assert_eq!(a.result.score, b.result.score);
    assert_eq!(a.result.depth_reached, 3);
}

#[tokio::test]
async fn request_from_parts_matches_state() {
    let state = GameState::from_fen("r3k2r/8/8/8/3pP3/8/8/R3K2R b KQkq e3 0 1").unwrap();
    let request = SearchRequest::from_parts(
        state.board,
        CastlingRights::ALL,
        Square::from_algebraic("e3"),
        false,
        100,
    )
    .unwrap();
    assert_eq!(request.state.board, state.board);
    assert_eq!(request.state.side_to_move, state.side_to_move);
    assert_eq!(request.state.castling, state.castling);
    assert_eq!(request.state.en_passant, state.en_passant);
    assert_eq!(request.time_limit_ms, 100);

    let coordinator = SearchCoordinator::spawn(config(6));
    let response = coordinator.search(request).await.unwrap();
    assert!(response.result.best_move.is_some());
}

#[test]
fn request_from_parts_rejects_impossible_positions() {
    let board = GameState::from_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1")
        .unwrap()
        .board;
    assert_eq!(
        SearchRequest::from_parts(board, CastlingRights::NONE, None, true, 100),
        Err(PositionError::OpponentInCheck {
            color: Color::Black
        })
    );
    assert!(SearchRequest::from_parts(board, CastlingRights::NONE, None, false, 100).is_ok());

    let mut kingless = board;
    kingless.clear(Square::E1);
    assert_eq!(
        SearchRequest::from_parts(kingless, CastlingRights::NONE, None, false, 100),
        Err(PositionError::KingCount {
            color: Color::White,
            count: 0
        })
    );
}
