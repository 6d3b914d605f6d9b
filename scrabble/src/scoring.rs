//! Word construction and scoring for a single play.
//!
//! These functions assume the placements have already been written onto a
//! (possibly scratch) [`Board`]; they only read the board back to find and
//! score the words the placements form.

use crate::{
    board::Board,
    pos::{Axis, Pos},
};
use std::collections::HashSet;

/// The number of newly placed tiles that triggers the bingo bonus.
pub const BINGO_SIZE: usize = 7;
/// The flat bonus awarded for using a full rack in one play.
pub const BINGO_BONUS: u32 = 50;

/// Finds every cell in the maximal contiguous run of occupied cells along
/// `axis` that passes through `pos` (including `pos` itself).
pub fn word_span(board: &Board, pos: Pos, axis: Axis) -> Vec<Pos> {
    let forward = axis.forward();
    let backward = forward.opposite();

    let mut start = pos;
    while let Some(prev) = start.step(backward) {
        match board.at(prev) {
            Some(_) => start = prev,
            None => break,
        }
    }

    start
        .walk(forward)
        .take_while(|&p| board.at(p).is_some())
        .collect()
}

/// Renders the letters at `positions` as a string, in order.
///
/// Panics if any position is unoccupied or (for a joker) has no letter
/// chosen yet; callers only pass spans produced by [`word_span`], whose
/// cells are all occupied by definition.
pub fn word_text(board: &Board, positions: &[Pos]) -> String {
    positions
        .iter()
        .map(|&p| {
            board
                .at(p)
                .and_then(|t| t.letter_char())
                .expect("word_span only returns occupied, lettered cells")
        })
        .collect()
}

/// Renders `positions` as a dictionary query string: a joker's cell
/// contributes `?` regardless of the letter it was placed as, matching the
/// wildcard contract a [`Dictionary`](crate::dictionary::Dictionary)
/// implementation accepts.
pub fn word_query(board: &Board, positions: &[Pos]) -> String {
    positions
        .iter()
        .map(|&p| {
            let tile = board
                .at(p)
                .expect("word_span only returns occupied cells");
            match tile.is_joker() {
                true => '?',
                false => tile
                    .letter_char()
                    .expect("non-joker tile always has a letter"),
            }
        })
        .collect()
}

/// Scores a word, applying tile/word multipliers only at positions in
/// `new_positions` (the cells this play just placed tiles on). Premiums on
/// previously-played cells never score again.
pub fn score_word(board: &Board, positions: &[Pos], new_positions: &HashSet<Pos>) -> u32 {
    let mut total = 0;
    let mut word_multiplier = 1;

    for &pos in positions {
        let cell = board.cell(pos);
        let tile = cell.tile.expect("word_span only returns occupied cells");
        let mut tile_score = tile.value();

        if new_positions.contains(&pos) {
            if let Some(premium) = cell.premium {
                tile_score *= premium.tile_multiplier();
                word_multiplier *= premium.word_multiplier();
            }
        }

        total += tile_score;
    }

    total * word_multiplier
}

/// All words formed by a play: the main word along `axis`, plus one cross
/// word (perpendicular) for every newly placed tile that has a neighbor in
/// that direction. Single-letter "words" (a placed tile with no neighbors
/// on that axis) are omitted, matching the rule that only formed words are
/// scored.
pub fn words_formed(
    board: &Board,
    new_positions: &HashSet<Pos>,
    axis: Axis,
) -> Vec<Vec<Pos>> {
    let mut words = Vec::new();

    let any_new = new_positions.iter().next().copied();
    if let Some(seed) = any_new {
        let main = word_span(board, seed, axis);
        if main.len() > 1 {
            words.push(main);
        }
    }

    let cross_axis = match axis {
        Axis::Row => Axis::Col,
        Axis::Col => Axis::Row,
    };
    for &pos in new_positions {
        let cross = word_span(board, pos, cross_axis);
        if cross.len() > 1 {
            words.push(cross);
        }
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    #[test]
    fn word_span_finds_contiguous_run() {
        let mut board = Board::default();
        let y = 7;
        for (i, letter) in "CAT".chars().enumerate() {
            board.place(Pos::new(7 + i, y).unwrap(), Tile::letter(i as u32, letter, 1));
        }

        let span = word_span(&board, Pos::new(8, y).unwrap(), Axis::Row);
        assert_eq!(word_text(&board, &span), "CAT");
    }

    #[test]
    fn word_query_replaces_joker_with_wildcard() {
        let mut board = Board::default();
        let joker = Tile::joker(1).placed_as('A');
        board.place(Pos::new(7, 7).unwrap(), joker);
        board.place(Pos::new(8, 7).unwrap(), Tile::letter(2, 'T', 1));

        let span = vec![Pos::new(7, 7).unwrap(), Pos::new(8, 7).unwrap()];
        assert_eq!(word_text(&board, &span), "AT");
        assert_eq!(word_query(&board, &span), "?T");
    }

    #[test]
    fn score_word_only_applies_premium_to_new_cells() {
        let mut board = Board::default();
        // center (7,7) is DoubleWord; place "AT" through it.
        board.place(Pos::new(7, 7).unwrap(), Tile::letter(1, 'A', 1));
        board.place(Pos::new(8, 7).unwrap(), Tile::letter(2, 'T', 1));

        let span = vec![Pos::new(7, 7).unwrap(), Pos::new(8, 7).unwrap()];
        let new_positions: HashSet<_> = span.iter().copied().collect();

        // AT = 1 + 1 = 2, doubled once for the center DoubleWord = 4.
        assert_eq!(score_word(&board, &span, &new_positions), 4);

        // Replayed as an "old" word (no new positions), no doubling.
        assert_eq!(score_word(&board, &span, &HashSet::new()), 2);
    }
}
