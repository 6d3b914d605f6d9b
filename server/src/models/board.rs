//! Wire views of the board and its tiles.

use scrabble::board::{Board, Premium};
use serde::{Deserialize, Serialize};

/// The wire form of a [`Premium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PremiumView {
    /// Double letter.
    Dl,
    /// Triple letter.
    Tl,
    /// Double word.
    Dw,
    /// Triple word.
    Tw,
}
impl From<Premium> for PremiumView {
    fn from(p: Premium) -> Self {
        match p {
            Premium::DoubleLetter => PremiumView::Dl,
            Premium::TripleLetter => PremiumView::Tl,
            Premium::DoubleWord => PremiumView::Dw,
            Premium::TripleWord => PremiumView::Tw,
        }
    }
}

/// The wire form of a tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    /// Stable tile id.
    pub id: u32,
    /// The tile's letter, or `None` for an unassigned joker.
    pub letter: Option<char>,
    /// Whether this tile is a joker.
    pub is_joker: bool,
    /// The tile's point value (always 0 for a joker).
    pub value: u32,
}
impl From<scrabble::tile::Tile> for TileView {
    fn from(tile: scrabble::tile::Tile) -> Self {
        Self {
            id: tile.id(),
            letter: tile.letter_char(),
            is_joker: tile.is_joker(),
            value: tile.value(),
        }
    }
}

/// The wire form of a single board cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// The cell's static premium, if any and unconsumed or consumed (the
    /// premium always displays; `bonusUsed` says whether it still applies).
    pub premium: Option<PremiumView>,
    /// Whether the premium has already been spent.
    pub bonus_used: bool,
    /// The tile occupying this cell, if any.
    pub tile: Option<TileView>,
}

/// The wire form of the whole board, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView(pub Vec<CellView>);
impl From<&Board> for BoardView {
    fn from(board: &Board) -> Self {
        Self(
            scrabble::pos::Pos::iter_all()
                .map(|pos| {
                    let cell = board.cell(pos);
                    CellView {
                        x: pos.x,
                        y: pos.y,
                        premium: cell.premium.map(PremiumView::from),
                        bonus_used: cell.bonus_used,
                        tile: cell.tile.map(TileView::from),
                    }
                })
                .collect(),
        )
    }
}
