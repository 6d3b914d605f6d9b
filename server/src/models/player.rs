//! Player data transfer objects.

use serde::{Deserialize, Serialize};

/// Per-player aggregate statistics, tracked for the lifetime of a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// Number of `play` actions that formed at least one word.
    pub words_played: u32,
    /// The highest single-move score this player has scored.
    pub best_word_score: u32,
    /// The word that earned [`Self::best_word_score`], if any.
    pub best_word: Option<String>,
    /// Successful `play` actions only (passes/exchanges are not turns, per
    /// the source behavior this preserves).
    pub total_turns: u32,
    /// Count of `pass` actions (an `exchange` also increments this,
    /// matching the source behavior).
    pub passes: u32,
}

/// The public view of a player: everything but their rack, which is
/// private and only ever sent to that player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    /// Stable player id, supplied by the client or generated on first
    /// connect.
    pub id: String,
    /// Display name, truncated to 15 characters.
    pub nickname: String,
    /// Whether this player currently has a live connection bound.
    pub connected: bool,
    /// Whether this player has toggled ready in the `waiting` room.
    pub ready: bool,
    /// The player's cumulative score for the current/last game.
    pub score: i32,
    /// Aggregate stats for the current/last game.
    pub stats: PlayerStats,
}
