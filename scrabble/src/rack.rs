//! Models a player's rack of tiles.

use crate::{
    error::{RuleError, RuleResult},
    letter_bag::Bag,
    tile::{Tile, TileId},
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The maximum number of tiles a rack can hold.
pub const RACK_SIZE: usize = 7;

/// A player's hand of up to [`RACK_SIZE`] tiles. Held as a plain `Vec`
/// rather than a by-letter multiset: each [`Tile`] carries a unique id, and
/// a rack is small enough that linear scans cost nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rack {
    tiles: Vec<Tile>,
}
impl Rack {
    /// Draws a fresh rack of up to [`RACK_SIZE`] tiles from `bag`.
    pub fn new(bag: &mut Bag) -> Self {
        Self {
            tiles: bag.draw_many(RACK_SIZE),
        }
    }
    /// The number of tiles on the rack.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }
    /// Whether the rack holds no tiles (a possible end-of-game condition).
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
    /// The number of tiles below [`RACK_SIZE`].
    pub fn missing_count(&self) -> usize {
        RACK_SIZE - self.len()
    }
    /// Draws tiles from `bag` to bring the rack back up to [`RACK_SIZE`]
    /// (or as close to it as the bag allows).
    pub fn refill(&mut self, bag: &mut Bag) {
        self.tiles.extend(bag.draw_many(self.missing_count()));
    }
    /// Sums the point value of every tile remaining on the rack, used to
    /// adjust scores at the end of the game.
    pub fn tile_sum(&self) -> u32 {
        self.tiles.iter().map(Tile::value).sum()
    }
    /// Whether every id in `ids` is present on the rack (duplicates in
    /// `ids` require that many copies of the id, though a rack can only
    /// ever hold one tile per id since ids are unique).
    pub fn contains_all(&self, ids: &[TileId]) -> bool {
        ids.iter().all(|id| self.tiles.iter().any(|t| t.id() == *id))
    }
    /// Removes the tiles with the given ids from the rack.
    fn remove_ids(&mut self, ids: &[TileId]) {
        self.tiles.retain(|t| !ids.contains(&t.id()));
    }
    /// Borrows the tile with the given id, if it's on the rack.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id() == id)
    }
    /// Exchanges the tiles named by `ids` for fresh ones drawn from `bag`,
    /// then returns the exchanged tiles to the bag and reshuffles.
    pub fn exchange(&mut self, ids: &[TileId], bag: &mut Bag, rng: &mut impl Rng) -> RuleResult<()> {
        if ids.is_empty() {
            return Err(RuleError::NoTilesToExchange);
        }
        if !self.contains_all(ids) {
            return Err(RuleError::TileNotInRack);
        }
        if bag.len() < ids.len() {
            return Err(RuleError::BagTooSmall);
        }

        let returned: Vec<Tile> = ids
            .iter()
            .map(|id| *self.tile(*id).expect("checked by contains_all"))
            .collect();

        self.remove_ids(ids);
        self.tiles.extend(bag.draw_many(ids.len()));
        bag.return_tiles(returned, rng);

        Ok(())
    }
    /// Removes the tiles named by `ids` from the rack for placement onto
    /// the board. Callers must validate `contains_all(ids)` first.
    pub fn remove_for_play(&mut self, ids: &[TileId]) {
        self.remove_ids(ids);
    }
    /// Iterates over the tiles currently on the rack.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
    /// Direct access to the backing tile vec, for tests that need to seed
    /// a rack with specific tiles without going through a [`Bag`].
    #[cfg(test)]
    pub fn tiles_for_test(&mut self) -> &mut Vec<Tile> {
        &mut self.tiles
    }
}
impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for tile in &self.tiles {
            write!(f, "{tile}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter_bag::Language;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn new_rack_draws_seven() {
        let mut bag = Bag::new(Language::English, &mut rng());
        let rack = Rack::new(&mut bag);
        assert_eq!(rack.len(), 7);
        assert_eq!(bag.len(), 93);
    }

    #[test]
    fn refill_tops_up_to_seven() {
        let mut bag = Bag::new(Language::English, &mut rng());
        let mut rack = Rack::new(&mut bag);
        let ids: Vec<_> = rack.iter().take(3).map(Tile::id).collect();
        rack.remove_for_play(&ids);
        assert_eq!(rack.len(), 4);

        rack.refill(&mut bag);
        assert_eq!(rack.len(), 7);
    }

    #[test]
    fn exchange_rejects_empty_selection() {
        let mut bag = Bag::new(Language::English, &mut rng());
        let mut rack = Rack::new(&mut bag);
        assert_eq!(
            rack.exchange(&[], &mut bag, &mut rng()),
            Err(RuleError::NoTilesToExchange)
        );
    }

    #[test]
    fn exchange_rejects_tile_not_on_rack() {
        let mut bag = Bag::new(Language::English, &mut rng());
        let mut rack = Rack::new(&mut bag);
        assert_eq!(
            rack.exchange(&[9_999], &mut bag, &mut rng()),
            Err(RuleError::TileNotInRack)
        );
    }

    #[test]
    fn exchange_preserves_rack_size_and_bag_size() {
        let mut bag = Bag::new(Language::English, &mut rng());
        let mut rack = Rack::new(&mut bag);
        let bag_before = bag.len();
        let ids: Vec<_> = rack.iter().take(2).map(Tile::id).collect();

        rack.exchange(&ids, &mut bag, &mut rng()).unwrap();
        assert_eq!(rack.len(), 7);
        assert_eq!(bag.len(), bag_before);
    }
}
