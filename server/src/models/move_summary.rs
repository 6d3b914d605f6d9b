//! Move log entries.

use super::board::TileView;
use serde::{Deserialize, Serialize};

/// Which action a move log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// A placement of one or more tiles.
    Play,
    /// A forfeited turn.
    Pass,
    /// A tile exchange.
    Exchange,
}

/// A single tile placement, as recorded in the move log (post-commit, so
/// the joker's chosen letter if any is already baked into `tile`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementView {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// The tile placed, with any joker letter already resolved.
    pub tile: TileView,
}

/// One entry in a room's append-only move log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSummaryView {
    /// The player who made the move.
    pub player_id: String,
    /// Which kind of action this was.
    pub action: ActionKind,
    /// Words formed by a `play`; empty for `pass`/`exchange`.
    pub words: Vec<String>,
    /// Points gained by this move (0 for `pass`/`exchange`).
    pub score_delta: u32,
    /// Tiles placed, for a `play`; empty otherwise.
    pub placements: Vec<PlacementView>,
    /// 1-indexed turn number within the game.
    pub turn_number: u32,
    /// Milliseconds since the Unix epoch when this move was committed.
    pub created_at: u64,
}
