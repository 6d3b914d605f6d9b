//! Rules, scoring, and state for a multiplayer scrabble game.
//!
//! This crate is pure: no networking, no filesystem access, no clocks. The
//! `server` crate drives it from the outside.

// Produce a compiler warning for missing documentation.
#![warn(missing_docs)]

pub mod board;
pub mod dictionary;
pub mod error;
pub mod letter_bag;
pub mod play;
pub mod pos;
pub mod rack;
pub mod rules;
pub mod scoring;
pub mod tile;
