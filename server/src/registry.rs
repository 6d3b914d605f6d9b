//! C4: room registry — create/join/leave, host succession, idle tracking.
//!
//! Mirrors the teacher's `GamesHandle`/`RoomsHandle` shape: an
//! `Arc<RwLock<_>>` handle around a plain map, with mutating calls taking
//! the write lock for their duration.

use crate::{
    error::ErrorCode,
    game::GameState,
    models::{PlayerStats, PlayerView, RoomStatus, RoomView},
    protocol::ServerMsg,
};
use rand::{distributions::Alphanumeric, Rng};
use std::{collections::HashMap, ops::Deref, sync::Arc};
use tokio::sync::{mpsc, RwLock};

const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const ROOM_CODE_ATTEMPTS: usize = 1_000;
const NICKNAME_MAX_LEN: usize = 15;

/// A connected (or formerly connected) player within a room. Lobby-scoped
/// attributes only; in-game rack/score/stats live in [`GameState`] (C3),
/// which this module never reads.
#[derive(Debug)]
pub struct PlayerSlot {
    id: String,
    nickname: String,
    connected: bool,
    ready: bool,
    sender: Option<mpsc::UnboundedSender<ServerMsg>>,
}
impl PlayerSlot {
    fn new(id: String, nickname: String) -> Self {
        Self {
            id,
            nickname,
            connected: true,
            ready: false,
            sender: None,
        }
    }
    /// The player's stable id.
    pub fn id(&self) -> &str {
        &self.id
    }
    /// Whether a live connection is currently bound.
    pub fn connected(&self) -> bool {
        self.connected
    }
    /// Whether the player has toggled ready.
    pub fn ready(&self) -> bool {
        self.ready
    }
    /// Sets the ready flag.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }
    /// Binds a live connection's outbound sender.
    pub fn bind(&mut self, sender: mpsc::UnboundedSender<ServerMsg>) {
        self.sender = Some(sender);
        self.connected = true;
    }
    /// Clears the connection binding on disconnect. The player remains a
    /// room member for a later reconnect.
    pub fn unbind(&mut self) {
        self.sender = None;
        self.connected = false;
    }
    /// Sends a message to this player's bound connection, if any.
    pub fn send(&self, msg: ServerMsg) {
        if let Some(sender) = &self.sender {
            if let Err(err) = sender.send(msg) {
                log::error!("failed to send to player {}: {err}", self.id);
            }
        }
    }
    /// The public view of this player, merged with its in-game score and
    /// stats if a game is active.
    pub fn view(&self, score: i32, stats: PlayerStats) -> PlayerView {
        PlayerView {
            id: self.id.clone(),
            nickname: self.nickname.clone(),
            connected: self.connected,
            ready: self.ready,
            score,
            stats,
        }
    }
}

/// A single game room: its lobby state plus, once started, its
/// [`GameState`].
#[derive(Debug)]
pub struct Room {
    code: String,
    host_id: String,
    status: RoomStatus,
    capacity: u8,
    players: Vec<PlayerSlot>,
    /// The active/finished game, if `startGame` has been called.
    pub game: Option<GameState>,
    last_activity_ms: u64,
}
impl Room {
    /// The room's code.
    pub fn code(&self) -> &str {
        &self.code
    }
    /// The current host's id.
    pub fn host_id(&self) -> &str {
        &self.host_id
    }
    /// The room's lifecycle status.
    pub fn status(&self) -> RoomStatus {
        self.status
    }
    /// Sets the room's lifecycle status.
    pub fn set_status(&mut self, status: RoomStatus) {
        self.status = status;
    }
    /// The room's player capacity, `1..=4`.
    pub fn capacity(&self) -> u8 {
        self.capacity
    }
    /// Players, in turn (join) order.
    pub fn players(&self) -> &[PlayerSlot] {
        &self.players
    }
    /// Whether `player_id` is a member of this room.
    pub fn is_member(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }
    /// Borrows a member by id, mutably.
    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut PlayerSlot> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }
    /// Borrows a member by id.
    pub fn player(&self, player_id: &str) -> Option<&PlayerSlot> {
        self.players.iter().find(|p| p.id == player_id)
    }
    /// Whether any member currently has a live connection.
    pub fn has_connected_player(&self) -> bool {
        self.players.iter().any(PlayerSlot::connected)
    }
    /// Updates the last-activity timestamp; called by every mutating
    /// operation.
    pub fn touch(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
    }
    /// Milliseconds since the Unix epoch of the room's last mutation.
    pub fn last_activity_ms(&self) -> u64 {
        self.last_activity_ms
    }
    /// Builds the public [`RoomView`], merging in each player's in-game
    /// score/stats when a game is active.
    pub fn view(&self) -> RoomView {
        RoomView {
            code: self.code.clone(),
            host_id: self.host_id.clone(),
            status: self.status,
            capacity: self.capacity,
            players: self
                .players
                .iter()
                .map(|slot| {
                    let (score, stats) = match &self.game {
                        Some(game) => game
                            .scores()
                            .find(|(id, _)| *id == slot.id())
                            .map(|(_, score)| score)
                            .zip(
                                game.stats()
                                    .find(|(id, _)| *id == slot.id())
                                    .map(|(_, stats)| stats.clone()),
                            )
                            .unwrap_or_default(),
                        None => Default::default(),
                    };
                    slot.view(score, stats)
                })
                .collect(),
        }
    }
    /// Removes a player. If the room becomes empty the caller (the
    /// [`Rooms`] map) deletes it entirely; otherwise, if the removed
    /// player was host, host transfers to the new `players[0]`.
    fn remove_player(&mut self, player_id: &str) {
        self.players.retain(|p| p.id != player_id);

        if self.host_id == player_id {
            if let Some(new_host) = self.players.first() {
                self.host_id = new_host.id.clone();
            }
        }
    }
}

/// Outcome of [`Rooms::join_room`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A brand new player was added.
    Joined { player_id: String },
    /// An existing player id re-attached to a room it was already in.
    Reattached { player_id: String },
}

/// Outcome of [`Rooms::remove_player`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Whether the room was deleted as a result (its player list emptied).
    pub room_deleted: bool,
    /// The new host, if host succession occurred.
    pub new_host_id: Option<String>,
}

/// The in-memory map of room code to [`Room`].
#[derive(Debug, Default)]
pub struct Rooms(HashMap<String, Room>);
impl Rooms {
    /// Borrows a room by code.
    pub fn get(&self, code: &str) -> Option<&Room> {
        self.0.get(code)
    }
    /// Mutably borrows a room by code.
    pub fn get_mut(&mut self, code: &str) -> Option<&mut Room> {
        self.0.get_mut(code)
    }
    /// Creates a room hosted by a fresh or supplied player id, returning
    /// the room code and the host's player id.
    pub fn create_room(
        &mut self,
        max_players: Option<u8>,
        nickname: String,
        player_id: Option<String>,
        rng: &mut impl Rng,
        now_ms: u64,
    ) -> Result<(String, String), ErrorCode> {
        let code = self.generate_code(rng)?;
        let host_id = player_id.unwrap_or_else(|| generate_player_id(rng));
        let nickname = truncate_nickname(&nickname);

        let room = Room {
            code: code.clone(),
            host_id: host_id.clone(),
            status: RoomStatus::Waiting,
            capacity: max_players.unwrap_or(4).clamp(1, 4),
            players: vec![PlayerSlot::new(host_id.clone(), nickname)],
            game: None,
            last_activity_ms: now_ms,
        };

        self.0.insert(code.clone(), room);
        Ok((code, host_id))
    }
    /// Joins an existing room, or re-attaches an existing member.
    pub fn join_room(
        &mut self,
        code: &str,
        nickname: String,
        player_id: Option<String>,
        rng: &mut impl Rng,
        now_ms: u64,
    ) -> Result<JoinOutcome, ErrorCode> {
        let room = self.0.get_mut(code).ok_or(ErrorCode::RoomNotFound)?;

        if let Some(id) = &player_id {
            if room.is_member(id) {
                room.touch(now_ms);
                return Ok(JoinOutcome::Reattached { player_id: id.clone() });
            }
        }

        if room.status != RoomStatus::Waiting {
            return Err(ErrorCode::RoomNotJoinable);
        }
        if room.players.len() >= room.capacity as usize {
            return Err(ErrorCode::RoomFull);
        }

        let nickname = truncate_nickname(&nickname);
        if room
            .players
            .iter()
            .any(|p| p.nickname.eq_ignore_ascii_case(&nickname))
        {
            return Err(ErrorCode::NicknameTaken);
        }

        let new_id = player_id.unwrap_or_else(|| generate_player_id(rng));
        room.players.push(PlayerSlot::new(new_id.clone(), nickname));
        room.touch(now_ms);

        Ok(JoinOutcome::Joined { player_id: new_id })
    }
    /// Removes a player from a room, deleting the room if it becomes
    /// empty and transferring host if the removed player was host.
    pub fn remove_player(&mut self, code: &str, player_id: &str, now_ms: u64) -> Option<RemoveOutcome> {
        let room = self.0.get_mut(code)?;
        room.remove_player(player_id);
        room.touch(now_ms);

        if room.players.is_empty() {
            self.0.remove(code);
            return Some(RemoveOutcome {
                room_deleted: true,
                new_host_id: None,
            });
        }

        Some(RemoveOutcome {
            room_deleted: false,
            new_host_id: Some(room.host_id().to_string()),
        })
    }
    /// Snapshots every room code currently tracked, for sweeps that must
    /// tolerate concurrent mutation while iterating.
    pub fn codes(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }
    /// Deletes `code` unconditionally (used by the idle sweep once it has
    /// decided a room qualifies).
    pub fn remove_room(&mut self, code: &str) -> Option<Room> {
        self.0.remove(code)
    }
    fn generate_code(&self, rng: &mut impl Rng) -> Result<String, ErrorCode> {
        for len in [4usize, 6] {
            for _ in 0..ROOM_CODE_ATTEMPTS {
                let code = random_code(rng, len);
                if !self.0.contains_key(&code) {
                    return Ok(code);
                }
            }
        }
        Err(ErrorCode::RoomIdGenerationFailed)
    }
}

fn random_code(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ROOM_CODE_ALPHABET.len());
            ROOM_CODE_ALPHABET[idx] as char
        })
        .collect()
}

fn generate_player_id(rng: &mut impl Rng) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

fn truncate_nickname(nickname: &str) -> String {
    nickname.chars().take(NICKNAME_MAX_LEN).collect()
}

/// A thread-safe handle to the room registry.
#[derive(Clone, Debug, Default)]
pub struct RoomsHandle(Arc<RwLock<Rooms>>);
impl Deref for RoomsHandle {
    type Target = RwLock<Rooms>;

    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn create_and_join_room() {
        let mut rooms = Rooms::default();
        let (code, host_id) = rooms
            .create_room(Some(2), "alice".into(), None, &mut rng(), 0)
            .unwrap();
        assert_eq!(code.len(), 4);

        let outcome = rooms
            .join_room(&code, "bob".into(), None, &mut rng(), 0)
            .unwrap();
        assert!(matches!(outcome, JoinOutcome::Joined { .. }));

        let room = rooms.get(&code).unwrap();
        assert_eq!(room.players().len(), 2);
        assert_eq!(room.host_id(), host_id);
    }

    #[test]
    fn join_room_rejects_duplicate_nickname() {
        let mut rooms = Rooms::default();
        let (code, _) = rooms
            .create_room(Some(4), "alice".into(), None, &mut rng(), 0)
            .unwrap();

        let result = rooms.join_room(&code, "ALICE".into(), None, &mut rng(), 0);
        assert_eq!(result.unwrap_err(), ErrorCode::NicknameTaken);
    }

    #[test]
    fn join_room_rejects_when_full() {
        let mut rooms = Rooms::default();
        let (code, _) = rooms
            .create_room(Some(1), "alice".into(), None, &mut rng(), 0)
            .unwrap();

        let result = rooms.join_room(&code, "bob".into(), None, &mut rng(), 0);
        assert_eq!(result.unwrap_err(), ErrorCode::RoomFull);
    }

    #[test]
    fn host_transfers_on_leave() {
        let mut rooms = Rooms::default();
        let (code, host_id) = rooms
            .create_room(Some(4), "alice".into(), None, &mut rng(), 0)
            .unwrap();
        rooms.join_room(&code, "bob".into(), Some("bob".into()), &mut rng(), 0).unwrap();

        let outcome = rooms.remove_player(&code, &host_id, 0).unwrap();
        assert!(!outcome.room_deleted);
        assert_eq!(outcome.new_host_id.as_deref(), Some("bob"));
    }

    #[test]
    fn removing_last_player_deletes_room() {
        let mut rooms = Rooms::default();
        let (code, host_id) = rooms
            .create_room(Some(4), "alice".into(), None, &mut rng(), 0)
            .unwrap();

        let outcome = rooms.remove_player(&code, &host_id, 0).unwrap();
        assert!(outcome.room_deleted);
        assert!(rooms.get(&code).is_none());
    }
}
