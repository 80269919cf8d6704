//! JSON rendering of search results.

use chess_search::{SearchResponse, SearchResult};
use serde::Serialize;

/// JSON representation of one search response.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SearchJson {
    /// Request id the response answers.
    pub id: u64,
    /// Best move in long algebraic notation, `null` if there is none.
    pub best_move: Option<String>,
    pub depth_reached: u32,
    /// Centipawns, positive favors white.
    pub score: i32,
    pub elapsed_ms: u64,
    pub nodes: u64,
}

impl From<&SearchResponse> for SearchJson {
    fn from(response: &SearchResponse) -> Self {
        let SearchResult {
            best_move,
            depth_reached,
            score,
            elapsed_ms,
            nodes,
        } = response.result;
        SearchJson {
            id: response.id.get(),
            best_move: best_move.map(|m| m.to_uci()),
            depth_reached,
            score,
            elapsed_ms,
            nodes,
        }
    }
}

/// Renders a response as a single JSON line.
pub fn to_json(response: &SearchResponse) -> serde_json::Result<String> {
    serde_json::to_string(&SearchJson::from(response))
}

/// Renders a response for people.
pub fn to_text(response: &SearchResponse) -> String {
    let r = &response.result;
    let best = r.best_move.map_or_else(|| "(none)".to_string(), |m| m.to_uci());
    format!(
        "bestmove {best} depth {} score {} nodes {} time {}ms",
        r.depth_reached, r.score, r.nodes, r.elapsed_ms
    )
}
