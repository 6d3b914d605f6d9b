//! Per-room game state, as seen by clients.

use super::{
    board::{BoardView, TileView},
    move_summary::MoveSummaryView,
};
use serde::{Deserialize, Serialize};

/// A personalized view of a room's game state: identical for every
/// recipient except `rack`, which is only populated for the player the
/// snapshot is being sent to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    /// The full board.
    pub board: BoardView,
    /// The id of the player whose turn it is.
    pub active_player_id: String,
    /// Milliseconds since the Unix epoch when the current turn expires.
    pub turn_ends_at: u64,
    /// The configured turn duration, in milliseconds.
    pub turn_duration_ms: u64,
    /// Number of tiles left in the bag.
    pub bag_remaining: usize,
    /// The append-only move log.
    pub move_log: Vec<MoveSummaryView>,
    /// Consecutive non-scoring actions so far.
    pub consecutive_passes: u32,
    /// Monotonically increasing version, bumped once per successful move.
    pub version: u64,
    /// The recipient's own rack. Always `None` in a view built for anyone
    /// other than its owner.
    pub rack: Option<Vec<TileView>>,
}
