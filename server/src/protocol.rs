//! The wire protocol: typed envelopes decoded/encoded at the coordinator
//! boundary. The transport only ever sees `{type, payload}` JSON objects;
//! everything past [`ClientMsg`]/[`ServerMsg`] deals in these enums.

use crate::{
    error::ErrorCode,
    models::{GameStateView, MoveSummaryView, PlayerStats, RoomView},
};
use scrabble::{play::Placement, tile::TileId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A message received from a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ClientMsg {
    /// Create a new room and join it as the host.
    CreateRoom {
        /// Desired display name.
        nickname: String,
        /// Requested capacity; clamped to `1..=4`. Defaults to 4.
        #[serde(default)]
        max_players: Option<u8>,
        /// Client-supplied stable player id, if the client has one.
        #[serde(default)]
        player_id: Option<String>,
    },
    /// Join an existing room.
    JoinRoom {
        /// The room's code.
        room_id: String,
        /// Desired display name.
        nickname: String,
        /// Client-supplied stable player id, if the client has one.
        #[serde(default)]
        player_id: Option<String>,
    },
    /// Rebind this connection to an existing player.
    Reconnect {
        /// The player id to rebind.
        player_id: String,
        /// The room the player last occupied.
        last_room_id: String,
    },
    /// Flip the sender's ready flag.
    ToggleReady {
        /// The room to act in.
        room_id: String,
        /// The new ready state.
        ready: bool,
        /// Client-supplied stable player id, if not yet bound.
        #[serde(default)]
        player_id: Option<String>,
    },
    /// Host-only: start the game.
    StartGame {
        /// The room to start.
        room_id: String,
        /// Client-supplied stable player id, if not yet bound.
        #[serde(default)]
        player_id: Option<String>,
    },
    /// Submit a move.
    PlayMove {
        /// The room the move applies to.
        room_id: String,
        /// Which action is being taken.
        action: ActionTag,
        /// Tile placements, required when `action` is `play`.
        #[serde(default)]
        placements: Option<Vec<Placement>>,
        /// Tile ids to exchange, required when `action` is `exchange`.
        #[serde(default)]
        tile_ids_to_exchange: Option<Vec<TileId>>,
    },
    /// Leave a room.
    LeaveRoom {
        /// The room to leave.
        room_id: String,
    },
}

/// Which kind of action a `playMove` envelope carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionTag {
    /// Place tiles.
    Play,
    /// Forfeit the turn.
    Pass,
    /// Swap tiles.
    Exchange,
}

/// A message sent to a client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerMsg {
    /// A full snapshot sent to a client right after it (re)joins a room.
    FullState {
        /// The room's public state.
        room: RoomView,
        /// The room's game state, if a game has started.
        game_state: Option<GameStateView>,
    },
    /// A room's public state changed; broadcast to every member.
    RoomUpdate {
        /// The room's public state.
        room: RoomView,
    },
    /// A personalized game-state snapshot (only the recipient's rack is
    /// populated).
    GameState {
        /// Which room this state belongs to.
        room_id: String,
        /// The personalized snapshot.
        game_state: GameStateView,
    },
    /// The active player and deadline changed.
    TurnUpdate {
        /// Which room this applies to.
        room_id: String,
        /// The id of the player whose turn it now is.
        active_player_id: String,
        /// Milliseconds since the Unix epoch when this turn expires.
        turn_ends_at: u64,
        /// The game state's version after this turn change.
        version: u64,
    },
    /// A submitted move was accepted and committed.
    MoveAccepted {
        /// Which room this applies to.
        room_id: String,
        /// The committed move.
        #[serde(rename = "move")]
        move_summary: MoveSummaryView,
    },
    /// A submitted move was rejected; no state changed.
    InvalidMove {
        /// Which room this applies to.
        room_id: String,
        /// The stable reason code.
        reason: ErrorCode,
    },
    /// The game in a room has ended.
    GameEnded {
        /// Which room this applies to.
        room_id: String,
        /// Final score per player id.
        scores: BTreeMap<String, i32>,
        /// Final aggregate stats per player id.
        stats_by_player: BTreeMap<String, PlayerStats>,
        /// Every player id tied for the highest final score.
        winner_ids: Vec<String>,
    },
    /// A protocol- or infrastructure-level error, unrelated to any
    /// particular room mutation.
    Error {
        /// The stable reason code.
        code: ErrorCode,
        /// A human-readable message, safe to display.
        message: String,
    },
}
