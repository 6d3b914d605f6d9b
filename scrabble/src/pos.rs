//! Board coordinates and directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of columns/rows on the board.
pub const SIZE: usize = 15;

/// A validated `(x, y)` coordinate on the 15x15 board, with
/// `0 <= x, y < 15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    /// Column, `0..15`.
    pub x: usize,
    /// Row, `0..15`.
    pub y: usize,
}
impl Pos {
    /// Builds a `Pos`, returning `None` if either coordinate is out of
    /// bounds.
    pub fn new(x: usize, y: usize) -> Option<Self> {
        match x < SIZE && y < SIZE {
            true => Some(Self { x, y }),
            false => None,
        }
    }
    /// The center cell, `(7, 7)`, where the first word of the game must
    /// land.
    pub fn center() -> Self {
        Self { x: 7, y: 7 }
    }
    /// Checks whether `self` is the center cell.
    pub fn is_center(&self) -> bool {
        *self == Self::center()
    }
    /// The position offset by one cell in `dir`, or `None` if that would
    /// leave the board.
    pub fn step(&self, dir: Direction) -> Option<Self> {
        let (dx, dy) = dir.vector();
        let x = self.x as i32 + dx;
        let y = self.y as i32 + dy;

        match (0..SIZE as i32).contains(&x) && (0..SIZE as i32).contains(&y) {
            true => Some(Self {
                x: x as usize,
                y: y as usize,
            }),
            false => None,
        }
    }
    /// Iterates from `self` to the edge of the board in direction `dir`,
    /// starting with `self`.
    pub fn walk(self, dir: Direction) -> impl Iterator<Item = Pos> {
        std::iter::successors(Some(self), move |pos| pos.step(dir))
    }
    /// Iterates over every cell on the board, row-major.
    pub fn iter_all() -> impl Iterator<Item = Pos> {
        (0..SIZE).flat_map(|y| (0..SIZE).map(move |x| Pos { x, y }))
    }
}
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four orthogonal directions, plus the two axes a move can align on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// -y
    North,
    /// +x
    East,
    /// +y
    South,
    /// -x
    West,
}
impl Direction {
    /// Unit vector `(dx, dy)` for the direction.
    pub fn vector(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
    /// The opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// The axis that a collinear set of placements lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// All placements share a row (`y`); the word reads east/west.
    Row,
    /// All placements share a column (`x`); the word reads north/south.
    Col,
}
impl Axis {
    /// The direction that extends a word along this axis.
    pub fn forward(&self) -> Direction {
        match self {
            Axis::Row => Direction::East,
            Axis::Col => Direction::South,
        }
    }
    /// The direction perpendicular to this axis (used to find cross-words).
    pub fn perpendicular(&self) -> Direction {
        match self {
            Axis::Row => Direction::South,
            Axis::Col => Direction::East,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_checked() {
        assert!(Pos::new(14, 14).is_some());
        assert!(Pos::new(15, 0).is_none());
        assert!(Pos::new(0, 15).is_none());
    }

    #[test]
    fn step_off_board_is_none() {
        let top_left = Pos::new(0, 0).unwrap();
        assert!(top_left.step(Direction::North).is_none());
        assert!(top_left.step(Direction::West).is_none());
        assert_eq!(top_left.step(Direction::East), Pos::new(1, 0));
    }

    #[test]
    fn iter_all_covers_board() {
        assert_eq!(Pos::iter_all().count(), SIZE * SIZE);
    }
}
