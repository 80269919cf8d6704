//! Game-tree search for the chess engine.
//!
//! - [`evaluate`] - static evaluation, positive favors white
//! - [`Searcher`] - iterative deepening minimax with alpha-beta pruning
//! - [`SearchCoordinator`] - runs searches off the caller's task and
//!   answers each request through its own channel
//! - [`SearchConfig`] - TOML-loadable search settings
//!
//! # Example
//!
//! ```
//! use chess_engine::GameState;
//! use chess_search::{SearchConfig, Searcher};
//! use std::time::Duration;
//!
//! let config = SearchConfig { seed: Some(7), max_depth: 2, ..SearchConfig::default() };
//! let mut searcher = Searcher::from_config(&config);
//! let result = searcher.search(&GameState::startpos(), Duration::from_millis(500));
//! assert!(result.best_move.is_some());
//! ```

mod config;
mod coordinator;
mod eval;
mod ordering;
mod search;

pub use config::{ConfigError, SearchConfig};
pub use coordinator::{
    CoordinatorError, PendingSearch, RequestId, SearchCoordinator, SearchRequest, SearchResponse,
};
pub use eval::{evaluate, piece_value};
pub use ordering::{order_moves, score_move};
pub use search::{SearchResult, Searcher, INF, MATE};
