//! Wire data-transfer objects: the public/personalized views of internal
//! room and game state sent to clients.

pub mod board;
pub mod game_state;
pub mod move_summary;
pub mod player;
pub mod room;

pub use board::{BoardView, CellView, PremiumView, TileView};
pub use game_state::GameStateView;
pub use move_summary::{ActionKind, MoveSummaryView, PlacementView};
pub use player::{PlayerStats, PlayerView};
pub use room::{RoomStatus, RoomView};
