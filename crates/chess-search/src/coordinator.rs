//! Runs searches away from the caller's task.
//!
//! A [`SearchCoordinator`] is a cheap handle to a background task that owns
//! a [`Searcher`]. Requests are queued on an mpsc channel and handled one at
//! a time in arrival order; each search runs on the blocking thread pool and
//! its result comes back on a oneshot channel tagged with the request's
//! [`RequestId`]. Callers that issue a new request before the old one
//! returns discard the stale response by comparing ids.

use crate::config::SearchConfig;
use crate::search::{SearchResult, Searcher};
use chess_core::{CastlingRights, Color, Square};
use chess_engine::{Board, GameState, PositionError};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

/// Errors returned to callers of the coordinator.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorError {
    /// The background task is gone and accepts no more requests.
    #[error("search coordinator has shut down")]
    Closed,
    /// The request was accepted but no response will arrive.
    #[error("search for request {0} was dropped")]
    Dropped(RequestId),
}

/// Identifies one search request. Ids increase with every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Returns the raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A position to search and how long to search it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest {
    pub state: GameState,
    pub time_limit_ms: u64,
}

impl SearchRequest {
    pub fn new(state: GameState, time_limit_ms: u64) -> Self {
        SearchRequest {
            state,
            time_limit_ms,
        }
    }

    /// Builds a request from the loose fields a remote caller sends.
    ///
    /// # Errors
    ///
    /// Fails like [`GameState::try_new`] when the board has the wrong
    /// number of kings or the side not to move is in check.
    pub fn from_parts(
        board: Board,
        castling: CastlingRights,
        en_passant: Option<Square>,
        side_to_move_is_white: bool,
        time_limit_ms: u64,
    ) -> Result<Self, PositionError> {
        let side = Color::from_is_white(side_to_move_is_white);
        let state = GameState::try_new(board, side, castling, en_passant)?;
        Ok(Self::new(state, time_limit_ms))
    }
}

/// The answer to one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResponse {
    pub id: RequestId,
    pub result: SearchResult,
}

/// A submitted request whose response has not been awaited yet.
#[derive(Debug)]
pub struct PendingSearch {
    id: RequestId,
    rx: oneshot::Receiver<SearchResponse>,
}

impl PendingSearch {
    /// Id of the request this is waiting on.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Waits for the search to finish.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Dropped`] if the coordinator shut down or
    /// the search task failed before answering.
    pub async fn wait(self) -> Result<SearchResponse, CoordinatorError> {
        self.rx.await.map_err(|_| CoordinatorError::Dropped(self.id))
    }
}

struct Job {
    id: RequestId,
    request: SearchRequest,
    reply: oneshot::Sender<SearchResponse>,
}

/// Handle to the background search task.
///
/// Clones share the same queue and id sequence. The task stops once every
/// handle has been dropped and the queue is drained.
#[derive(Clone)]
pub struct SearchCoordinator {
    tx: mpsc::Sender<Job>,
    next_id: Arc<AtomicU64>,
}

impl SearchCoordinator {
    /// Starts the background task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(config: SearchConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        tokio::spawn(run(rx, config));
        SearchCoordinator {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Queues a request and returns a handle to await its response.
    ///
    /// Waits for queue space if the queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Closed`] if the background task is gone.
    pub async fn submit(&self, request: SearchRequest) -> Result<PendingSearch, CoordinatorError> {
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Job { id, request, reply })
            .await
            .map_err(|_| CoordinatorError::Closed)?;
        Ok(PendingSearch { id, rx })
    }

    /// Queues a request and waits for its response.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse, CoordinatorError> {
        self.submit(request).await?.wait().await
    }
}

async fn run(mut rx: mpsc::Receiver<Job>, config: SearchConfig) {
    let mut searcher = Some(Searcher::from_config(&config));

    while let Some(job) = rx.recv().await {
        let Job { id, request, reply } = job;
        if reply.is_closed() {
            debug!(%id, "skipping search nobody is waiting for");
            continue;
        }
        info!(%id, time_limit_ms = request.time_limit_ms, "search request received");

        let mut worker = searcher
            .take()
            .unwrap_or_else(|| Searcher::from_config(&config));
        let outcome = tokio::task::spawn_blocking(move || {
            let limit = Duration::from_millis(request.time_limit_ms);
            let result = worker.search(&request.state, limit);
            (worker, result)
        })
        .await;

        match outcome {
            Ok((worker, result)) => {
                searcher = Some(worker);
                info!(
                    %id,
                    depth = result.depth_reached,
                    elapsed_ms = result.elapsed_ms,
                    "search request complete"
                );
                if reply.send(SearchResponse { id, result }).is_err() {
                    warn!(%id, "requester went away before the search finished");
                }
            }
            Err(err) => {
                error!(%id, %err, "search task failed");
            }
        }
    }

    debug!("search coordinator shutting down");
}
