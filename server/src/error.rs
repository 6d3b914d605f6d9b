//! Wire-level error codes surfaced to clients.

use scrabble::error::RuleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable error code, sent to clients either as `error.code` (protocol
/// and infrastructure errors) or `invalidMove.reason` (rule violations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The envelope's `payload` didn't match the shape expected for its
    /// `type`.
    BadPayload,
    /// The envelope's `type` isn't a known inbound message.
    UnknownType,
    /// No room exists with the given code.
    RoomNotFound,
    /// The room has reached its player capacity.
    RoomFull,
    /// The room isn't in `waiting` status (so it can't be joined).
    RoomNotJoinable,
    /// Another player in the room already has this nickname.
    NicknameTaken,
    /// The requesting player isn't a member of the room.
    NotInRoom,
    /// Only the host may perform this action.
    NotHost,
    /// The room doesn't have enough players to start.
    MinPlayers,
    /// Not every player has toggled ready.
    NotAllReady,
    /// The room/game isn't in the right status for this action.
    InvalidState,
    /// It isn't the requesting player's turn.
    NotYourTurn,
    /// A placement fell outside the board.
    OutOfBounds,
    /// A placement targeted an occupied cell.
    CellOccupied,
    /// A placed tile isn't in the player's rack.
    TileNotInRack,
    /// The same tile was placed twice.
    DuplicateTile,
    /// A joker placement didn't specify which letter it stands in for.
    JokerLetterRequired,
    /// Placements don't share a single row or column.
    NotAligned,
    /// The first move of the game didn't cover the center cell.
    MustCoverCenter,
    /// The placement line has a gap.
    NotContiguous,
    /// The play doesn't connect to an existing tile.
    NotConnected,
    /// No placements were submitted.
    NoWordFormed,
    /// A formed word failed dictionary validation.
    InvalidWord,
    /// An exchange had no tile ids.
    NoTilesToExchange,
    /// An exchange asked for more tiles than remain in the bag.
    BagTooSmall,
    /// An unexpected, internal failure. The room is left unmutated.
    ServerError,
    /// Exhausted both the 4-character and 6-character room-code retry
    /// budgets without finding a free code.
    RoomIdGenerationFailed,
}
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
impl From<RuleError> for ErrorCode {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::NoWordFormed => ErrorCode::NoWordFormed,
            RuleError::OutOfBounds => ErrorCode::OutOfBounds,
            RuleError::CellOccupied => ErrorCode::CellOccupied,
            RuleError::TileNotInRack => ErrorCode::TileNotInRack,
            RuleError::DuplicateTile => ErrorCode::DuplicateTile,
            RuleError::JokerLetterRequired => ErrorCode::JokerLetterRequired,
            RuleError::NotAligned => ErrorCode::NotAligned,
            RuleError::MustCoverCenter => ErrorCode::MustCoverCenter,
            RuleError::NotContiguous => ErrorCode::NotContiguous,
            RuleError::NotConnected => ErrorCode::NotConnected,
            RuleError::InvalidWord => ErrorCode::InvalidWord,
            RuleError::NoTilesToExchange => ErrorCode::NoTilesToExchange,
            RuleError::BagTooSmall => ErrorCode::BagTooSmall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_error_maps_through() {
        assert_eq!(ErrorCode::from(RuleError::NotConnected), ErrorCode::NotConnected);
    }

    #[test]
    fn serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::RoomNotFound).unwrap();
        assert_eq!(json, "\"ROOM_NOT_FOUND\"");
    }
}
