#![warn(missing_docs)]
//! Authoritative multiplayer scrabble room server: websocket transport,
//! room registry, and the per-room game lifecycle built on the `scrabble`
//! crate's pure rules engine.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod game;
pub mod handlers;
pub mod models;
pub mod protocol;
pub mod registry;
pub mod time;
pub mod timers;
