//! Models a scrabble tile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable, unique identifier for a single physical tile, assigned once
/// when the bag is built and never reused.
pub type TileId = u32;

/// A single scrabble tile: a letter `A..Z`, or a blank/joker.
///
/// A joker's `letter` is `None` while it sits in the bag or a rack, and is
/// set to a player's chosen letter only once placed on the board (see
/// [`Tile::placed_as`]). Per the official rules, a joker's point value is
/// `0` forever, regardless of the letter it is standing in for. The value
/// is stamped in at construction (from the bag's language distribution)
/// rather than looked up from the letter, since the English and French
/// distributions assign different points to the same letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    letter: Option<char>,
    is_joker: bool,
    value: u32,
}
impl Tile {
    /// Builds a lettered tile (`A..Z`) worth `value` points.
    pub fn letter(id: TileId, letter: char, value: u32) -> Self {
        assert!(letter.is_ascii_uppercase(), "tile letters must be A..Z");

        Self {
            id,
            letter: Some(letter),
            is_joker: false,
            value,
        }
    }
    /// Builds an unassigned blank/joker tile, always worth `0` points.
    pub fn joker(id: TileId) -> Self {
        Self {
            id,
            letter: None,
            is_joker: true,
            value: 0,
        }
    }
    /// The tile's id.
    pub fn id(&self) -> TileId {
        self.id
    }
    /// Whether this tile is a joker.
    pub fn is_joker(&self) -> bool {
        self.is_joker
    }
    /// The tile's current letter, if chosen/assigned.
    pub fn letter_char(&self) -> Option<char> {
        self.letter
    }
    /// Returns a copy of this tile placed on the board as `letter`. Only
    /// meaningful for jokers: a non-joker tile is returned unchanged (its
    /// letter never changes).
    pub fn placed_as(&self, letter: char) -> Self {
        match self.is_joker {
            true => Self {
                letter: Some(letter),
                ..*self
            },
            false => *self,
        }
    }
    /// The tile's point value. A joker is worth `0` forever, even once a
    /// letter has been chosen for it.
    pub fn value(&self) -> u32 {
        self.value
    }
}
impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_joker, self.letter) {
            (true, Some(l)) => write!(f, "({l})"),
            (true, None) => write!(f, "(_)"),
            (false, Some(l)) => write!(f, "{l}"),
            (false, None) => unreachable!("non-joker tile always has a letter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joker_is_always_zero_value() {
        let joker = Tile::joker(1);
        assert_eq!(joker.value(), 0);

        let placed = joker.placed_as('E');
        assert_eq!(placed.value(), 0);
        assert_eq!(placed.letter_char(), Some('E'));
        assert!(placed.is_joker());
    }

    #[test]
    fn placed_as_is_noop_for_letters() {
        let tile = Tile::letter(3, 'Z', 10);
        assert_eq!(tile.placed_as('A'), tile);
    }
}
