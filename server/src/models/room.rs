//! Room data transfer objects.

use super::player::PlayerView;
use serde::{Deserialize, Serialize};

/// A room's lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomStatus {
    /// Waiting for players to join/ready up; no game state yet.
    Waiting,
    /// A game is in progress.
    Playing,
    /// The game has ended; the room is kept around for its final state.
    Finished,
}

/// The public view of a room, sent in `roomUpdate`/`fullState`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    /// The room's 4 (or 6, on collision fallback) character code.
    pub code: String,
    /// The id of the current host.
    pub host_id: String,
    /// Current lifecycle status.
    pub status: RoomStatus,
    /// Maximum number of players, clamped to `1..=4`.
    pub capacity: u8,
    /// Players, in turn (insertion) order.
    pub players: Vec<PlayerView>,
}
