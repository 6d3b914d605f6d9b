//! The error and result types for the rules engine.

use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// The [`Result`] type for the rules engine.
pub type RuleResult<T> = std::result::Result<T, RuleError>;

/// Stable error codes surfaced for a rejected `play`/`exchange`. Variant
/// order follows the legal-placement predicate: the first failing check
/// in that order determines the error returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleError {
    /// A `play` action had no placements.
    NoWordFormed,
    /// A placement's `(x, y)` fell outside the 15x15 board.
    OutOfBounds,
    /// A placement targeted a cell that already holds a tile.
    CellOccupied,
    /// A placement referenced a tile id that isn't in the player's rack.
    TileNotInRack,
    /// The same tile id was used twice in one placement set.
    DuplicateTile,
    /// A joker placement didn't specify which letter it stands in for.
    JokerLetterRequired,
    /// Placements didn't all share a single row or column.
    NotAligned,
    /// The first move of the game didn't cover the center cell.
    MustCoverCenter,
    /// The spanned cells on the placement line contain a gap.
    NotContiguous,
    /// No placement touches an existing tile or the center cell.
    NotConnected,
    /// The main word or a cross-word failed dictionary validation.
    InvalidWord,
    /// An `exchange` had an empty tile id list.
    NoTilesToExchange,
    /// An `exchange` asked for more tiles than remain in the bag.
    BagTooSmall,
}

impl Error for RuleError {}
impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RuleError::NoWordFormed => "no placements were submitted",
                RuleError::OutOfBounds => "a placement fell outside the board",
                RuleError::CellOccupied => "a placement targeted an occupied cell",
                RuleError::TileNotInRack => "a placed tile is not in the player's rack",
                RuleError::DuplicateTile => "the same tile was placed twice",
                RuleError::JokerLetterRequired => "a joker placement must specify a letter",
                RuleError::NotAligned => "placements must share a single row or column",
                RuleError::MustCoverCenter => "the first move must cover the center cell",
                RuleError::NotContiguous => "placements leave a gap in the word",
                RuleError::NotConnected => "the play doesn't connect to an existing tile",
                RuleError::InvalidWord => "a formed word is not in the dictionary",
                RuleError::NoTilesToExchange => "no tiles were selected to exchange",
                RuleError::BagTooSmall => "the bag doesn't have enough tiles to exchange",
            }
        )
    }
}
