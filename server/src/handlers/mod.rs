//! C5: connection lifecycle and message dispatch.

pub mod connection;
pub mod dispatch;

use crate::{config::Config, dictionary::load_or_permissive, registry::RoomsHandle};
use scrabble::dictionary::Dictionary;
use std::sync::Arc;

/// Shared, cheaply-cloneable services every connection's dispatch loop
/// needs: the room registry, the dictionary, and the running config.
#[derive(Clone)]
pub struct Context {
    /// The room registry.
    pub rooms: RoomsHandle,
    /// The word list used to validate plays.
    pub dictionary: Arc<dyn Dictionary>,
    /// The running configuration.
    pub config: Arc<Config>,
}
impl Context {
    /// Builds a fresh context, loading the dictionary from
    /// `config.word_list_path`.
    pub fn new(config: Config) -> Self {
        let dictionary = load_or_permissive(config.word_list_path.as_deref());
        Self {
            rooms: RoomsHandle::default(),
            dictionary,
            config: Arc::new(config),
        }
    }
}

/// Per-connection binding state: which player and room this websocket is
/// currently acting as/in, if any. Owned entirely by the connection's own
/// task — no separate connection-id map to keep in sync.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The player id this connection is bound to, once created/joined.
    pub player_id: Option<String>,
    /// The room id this connection is currently a member of.
    pub room_id: Option<String>,
}
