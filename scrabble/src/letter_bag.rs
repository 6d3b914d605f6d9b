//! Models the [`Bag`] of undrawn tiles and the per-language letter
//! distributions.

use crate::tile::{Tile, TileId};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

/// Selects which letter distribution a game's bag is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// The standard English-language distribution.
    English,
    /// The standard French-language distribution.
    French,
}
impl Language {
    /// The `(letter, count, value)` triples making up this language's
    /// initial bag, not including the two blanks (which every language
    /// shares: two tiles, worth `0` points).
    fn distribution(&self) -> &'static [(char, u32, u32)] {
        match self {
            Language::English => &EN_DISTRIBUTION,
            Language::French => &FR_DISTRIBUTION,
        }
    }
}

#[rustfmt::skip]
const EN_DISTRIBUTION: [(char, u32, u32); 26] = [
    ('A', 9, 1), ('B', 2, 3), ('C', 2, 3), ('D', 4, 2), ('E', 12, 1), ('F', 2, 4),
    ('G', 3, 2), ('H', 2, 4), ('I', 9, 1), ('J', 1, 8), ('K', 1, 5), ('L', 4, 1),
    ('M', 2, 3), ('N', 6, 1), ('O', 8, 1), ('P', 2, 3), ('Q', 1, 10), ('R', 6, 1),
    ('S', 4, 1), ('T', 6, 1), ('U', 4, 1), ('V', 2, 4), ('W', 2, 4), ('X', 1, 8),
    ('Y', 2, 4), ('Z', 1, 10),
];

#[rustfmt::skip]
const FR_DISTRIBUTION: [(char, u32, u32); 26] = [
    ('A', 9, 1), ('B', 2, 3), ('C', 2, 3), ('D', 3, 2), ('E', 15, 1), ('F', 2, 4),
    ('G', 2, 2), ('H', 2, 4), ('I', 8, 1), ('J', 1, 8), ('K', 1, 10), ('L', 5, 1),
    ('M', 3, 2), ('N', 6, 1), ('O', 6, 1), ('P', 2, 3), ('Q', 1, 8), ('R', 6, 1),
    ('S', 6, 1), ('T', 6, 1), ('U', 6, 1), ('V', 2, 4), ('W', 1, 10), ('X', 1, 10),
    ('Y', 1, 10), ('Z', 1, 10),
];

/// The number of blank/joker tiles in every language's distribution.
const BLANK_COUNT: u32 = 2;

/// A finite multiset of tiles, represented as an ordered sequence: drawing
/// pops from the end, returning tiles appends then reshuffles.
///
/// Tile conservation holds across any sequence of draws/returns: the
/// multiset of tiles in `bag ∪ board ∪ all racks` always equals the
/// initial distribution for the bag's language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bag {
    tiles: Vec<Tile>,
}
impl Bag {
    /// Builds a fresh, shuffled bag for `language`, using `rng` for both
    /// id assignment order and the Fisher-Yates shuffle. Accepting an
    /// injectable RNG (rather than reaching for a thread-local one) lets
    /// tests supply a seeded, deterministic generator.
    pub fn new(language: Language, rng: &mut impl Rng) -> Self {
        let mut next_id: TileId = 0;
        let mut tiles = Vec::new();

        for &(letter, count, value) in language.distribution() {
            for _ in 0..count {
                tiles.push(Tile::letter(next_id, letter, value));
                next_id += 1;
            }
        }
        for _ in 0..BLANK_COUNT {
            tiles.push(Tile::joker(next_id));
            next_id += 1;
        }

        tiles.shuffle(rng);

        Self { tiles }
    }
    /// The number of tiles remaining in the bag.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }
    /// Whether the bag has no tiles left.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
    /// Draws a single tile, or `None` if the bag is empty.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }
    /// Draws up to `count` tiles (fewer if the bag runs out first).
    pub fn draw_many(&mut self, count: usize) -> Vec<Tile> {
        (0..count).filter_map(|_| self.draw()).collect()
    }
    /// Returns `tiles` to the bag and reshuffles.
    pub fn return_tiles(&mut self, tiles: impl IntoIterator<Item = Tile>, rng: &mut impl Rng) {
        self.tiles.extend(tiles);
        self.tiles.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn english_bag_has_100_tiles() {
        let bag = Bag::new(Language::English, &mut rng());
        assert_eq!(bag.len(), 100);
    }

    #[test]
    fn french_bag_has_102_tiles() {
        let bag = Bag::new(Language::French, &mut rng());
        assert_eq!(bag.len(), 102);
    }

    #[test]
    fn draw_many_stops_at_empty_bag() {
        let mut bag = Bag::new(Language::English, &mut rng());
        let drawn = bag.draw_many(1_000);
        assert_eq!(drawn.len(), 100);
        assert!(bag.is_empty());
        assert_eq!(bag.draw(), None);
    }

    #[test]
    fn return_tiles_round_trips_len() {
        let mut bag = Bag::new(Language::English, &mut rng());
        let before = bag.len();
        let drawn = bag.draw_many(7);

        bag.return_tiles(drawn, &mut rng());
        assert_eq!(bag.len(), before);
    }

    #[test]
    fn no_duplicate_tile_ids() {
        let bag = Bag::new(Language::English, &mut rng());
        let mut ids: Vec<_> = bag.tiles.iter().map(Tile::id).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
