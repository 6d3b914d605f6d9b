//! The actions a player can take on their turn.

use crate::{pos::Pos, tile::TileId};
use serde::{Deserialize, Serialize};

/// One tile placed onto the board as part of a [`Action::Play`].
///
/// `letter` selects which letter a joker stands in as; it is ignored (and
/// should be `None`) for a non-joker tile, whose letter is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Where the tile lands on the board.
    pub pos: Pos,
    /// Which tile, by id, from the player's rack.
    pub tile: TileId,
    /// The letter a joker is played as. `None` for a non-joker tile.
    pub letter: Option<char>,
}

/// A player's chosen action for their turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Place one or more tiles on the board, forming a word.
    Play(Vec<Placement>),
    /// Forfeit the turn without changing the board or rack.
    Pass,
    /// Swap the named tiles from the rack for new ones from the bag.
    Exchange(Vec<TileId>),
}
