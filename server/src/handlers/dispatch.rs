//! Turns one decoded [`ClientMsg`] into registry/game mutations and the
//! resulting broadcast(s). Each handler here owns the write lock for only
//! as long as it needs it.

use super::{Context, Session};
use crate::{
    error::ErrorCode,
    game::GameState,
    protocol::{ActionTag, ClientMsg, ServerMsg},
    registry::{JoinOutcome, Room},
    time::now_ms,
};
use scrabble::play::Action;
use tokio::sync::mpsc::UnboundedSender;

/// Dispatches a single decoded client message.
pub async fn handle(ctx: &Context, session: &mut Session, msg: ClientMsg, outbox: &UnboundedSender<ServerMsg>) {
    match msg {
        ClientMsg::CreateRoom {
            nickname,
            max_players,
            player_id,
        } => create_room(ctx, session, nickname, max_players, player_id, outbox).await,
        ClientMsg::JoinRoom {
            room_id,
            nickname,
            player_id,
        } => join_room(ctx, session, room_id, nickname, player_id, outbox).await,
        ClientMsg::Reconnect { player_id, last_room_id } => {
            reconnect(ctx, session, player_id, last_room_id, outbox).await
        }
        ClientMsg::ToggleReady {
            room_id,
            ready,
            player_id,
        } => toggle_ready(ctx, session, room_id, ready, player_id, outbox).await,
        ClientMsg::StartGame { room_id, player_id } => start_game(ctx, session, room_id, player_id, outbox).await,
        ClientMsg::PlayMove {
            room_id,
            action,
            placements,
            tile_ids_to_exchange,
        } => play_move(ctx, session, room_id, action, placements, tile_ids_to_exchange, outbox).await,
        ClientMsg::LeaveRoom { room_id } => leave_room(ctx, session, room_id, outbox).await,
    }
}

/// Called when a connection's socket closes. Unbinds whatever player it
/// was bound to, leaving room membership intact for a later reconnect.
pub async fn disconnect(ctx: &Context, session: &Session) {
    let (Some(room_id), Some(player_id)) = (&session.room_id, &session.player_id) else {
        return;
    };

    let mut rooms = ctx.rooms.write().await;
    let Some(room) = rooms.get_mut(room_id) else {
        return;
    };
    if let Some(slot) = room.player_mut(player_id) {
        slot.unbind();
    }
    room.touch(now_ms());

    broadcast_room_update(room);
}

fn reply_error(outbox: &UnboundedSender<ServerMsg>, code: ErrorCode, message: impl Into<String>) {
    let _ = outbox.send(ServerMsg::Error {
        code,
        message: message.into(),
    });
}

fn broadcast_room_update(room: &Room) {
    let view = room.view();
    for player in room.players() {
        player.send(ServerMsg::RoomUpdate { room: view.clone() });
    }
}

fn broadcast_game_state(room: &Room) {
    let Some(game) = &room.game else { return };
    for player in room.players() {
        player.send(ServerMsg::GameState {
            room_id: room.code().to_string(),
            game_state: game.view_for(player.id()),
        });
    }
}

async fn create_room(
    ctx: &Context,
    session: &mut Session,
    nickname: String,
    max_players: Option<u8>,
    player_id: Option<String>,
    outbox: &UnboundedSender<ServerMsg>,
) {
    let mut rng = rand::thread_rng();
    let mut rooms = ctx.rooms.write().await;

    let (code, host_id) = match rooms.create_room(max_players, nickname, player_id, &mut rng, now_ms()) {
        Ok(pair) => pair,
        Err(err) => return reply_error(outbox, err, "failed to create room"),
    };

    let room = rooms.get_mut(&code).expect("just created");
    room.player_mut(&host_id).expect("just added").bind(outbox.clone());

    session.player_id = Some(host_id);
    session.room_id = Some(code);

    let _ = outbox.send(ServerMsg::FullState {
        room: room.view(),
        game_state: None,
    });
}

async fn join_room(
    ctx: &Context,
    session: &mut Session,
    room_id: String,
    nickname: String,
    player_id: Option<String>,
    outbox: &UnboundedSender<ServerMsg>,
) {
    let mut rng = rand::thread_rng();
    let mut rooms = ctx.rooms.write().await;

    let outcome = match rooms.join_room(&room_id, nickname, player_id, &mut rng, now_ms()) {
        Ok(outcome) => outcome,
        Err(err) => return reply_error(outbox, err, "failed to join room"),
    };

    let joined_id = match outcome {
        JoinOutcome::Joined { player_id } => player_id,
        JoinOutcome::Reattached { player_id } => player_id,
    };

    let room = rooms.get_mut(&room_id).expect("just joined");
    room.player_mut(&joined_id).expect("just added").bind(outbox.clone());

    session.player_id = Some(joined_id.clone());
    session.room_id = Some(room_id);

    let game_state = room.game.as_ref().map(|game| game.view_for(&joined_id));
    let _ = outbox.send(ServerMsg::FullState {
        room: room.view(),
        game_state,
    });

    broadcast_room_update(room);
}

async fn reconnect(
    ctx: &Context,
    session: &mut Session,
    player_id: String,
    last_room_id: String,
    outbox: &UnboundedSender<ServerMsg>,
) {
    let mut rooms = ctx.rooms.write().await;

    let Some(room) = rooms.get_mut(&last_room_id) else {
        return reply_error(outbox, ErrorCode::RoomNotFound, "room no longer exists");
    };
    if !room.is_member(&player_id) {
        return reply_error(outbox, ErrorCode::NotInRoom, "not a member of this room");
    }

    room.player_mut(&player_id).expect("checked membership").bind(outbox.clone());
    room.touch(now_ms());

    session.player_id = Some(player_id.clone());
    session.room_id = Some(last_room_id);

    let game_state = room.game.as_ref().map(|game| game.view_for(&player_id));
    let _ = outbox.send(ServerMsg::FullState {
        room: room.view(),
        game_state,
    });

    broadcast_room_update(room);
}

async fn toggle_ready(
    ctx: &Context,
    session: &mut Session,
    room_id: String,
    ready: bool,
    player_id: Option<String>,
    outbox: &UnboundedSender<ServerMsg>,
) {
    let Some(player_id) = player_id.or_else(|| session.player_id.clone()) else {
        return reply_error(outbox, ErrorCode::NotInRoom, "no player id bound to this connection");
    };

    let mut rooms = ctx.rooms.write().await;
    let Some(room) = rooms.get_mut(&room_id) else {
        return reply_error(outbox, ErrorCode::RoomNotFound, "room not found");
    };
    let Some(slot) = room.player_mut(&player_id) else {
        return reply_error(outbox, ErrorCode::NotInRoom, "not a member of this room");
    };

    slot.set_ready(ready);
    room.touch(now_ms());

    broadcast_room_update(room);
}

async fn start_game(
    ctx: &Context,
    session: &mut Session,
    room_id: String,
    player_id: Option<String>,
    outbox: &UnboundedSender<ServerMsg>,
) {
    use crate::models::RoomStatus;

    let Some(player_id) = player_id.or_else(|| session.player_id.clone()) else {
        return reply_error(outbox, ErrorCode::NotInRoom, "no player id bound to this connection");
    };

    let mut rng = rand::thread_rng();
    let mut rooms = ctx.rooms.write().await;
    let Some(room) = rooms.get_mut(&room_id) else {
        return reply_error(outbox, ErrorCode::RoomNotFound, "room not found");
    };

    if room.host_id() != player_id {
        return reply_error(outbox, ErrorCode::NotHost, "only the host may start the game");
    }
    if room.status() != RoomStatus::Waiting {
        return reply_error(outbox, ErrorCode::InvalidState, "room isn't waiting to start");
    }
    if room.players().len() < 2 {
        return reply_error(outbox, ErrorCode::MinPlayers, "need at least 2 players");
    }
    if room.players().iter().any(|p| p.id() != room.host_id() && !p.ready()) {
        return reply_error(outbox, ErrorCode::NotAllReady, "not every player is ready");
    }

    let order: Vec<String> = room.players().iter().map(|p| p.id().to_string()).collect();
    let game = GameState::start(
        order,
        ctx.config.language,
        ctx.config.turn_duration,
        &mut rng,
        now_ms(),
    );
    room.game = Some(game);
    room.set_status(RoomStatus::Playing);
    room.touch(now_ms());

    broadcast_room_update(room);
    broadcast_game_state(room);
}

async fn play_move(
    ctx: &Context,
    session: &mut Session,
    room_id: String,
    action: ActionTag,
    placements: Option<Vec<scrabble::play::Placement>>,
    tile_ids_to_exchange: Option<Vec<scrabble::tile::TileId>>,
    outbox: &UnboundedSender<ServerMsg>,
) {
    use crate::models::RoomStatus;

    let Some(player_id) = session.player_id.clone() else {
        return reply_error(outbox, ErrorCode::NotInRoom, "no player id bound to this connection");
    };

    let action = match action {
        ActionTag::Play => match placements {
            Some(placements) => Action::Play(placements),
            None => return reply_error(outbox, ErrorCode::BadPayload, "play action requires placements"),
        },
        ActionTag::Pass => Action::Pass,
        ActionTag::Exchange => match tile_ids_to_exchange {
            Some(ids) => Action::Exchange(ids),
            None => {
                return reply_error(
                    outbox,
                    ErrorCode::BadPayload,
                    "exchange action requires tileIdsToExchange",
                )
            }
        },
    };

    let mut rng = rand::thread_rng();
    let mut rooms = ctx.rooms.write().await;
    let Some(room) = rooms.get_mut(&room_id) else {
        return reply_error(outbox, ErrorCode::RoomNotFound, "room not found");
    };
    if room.status() != RoomStatus::Playing {
        return reply_error(outbox, ErrorCode::InvalidState, "game isn't in progress");
    }
    let Some(game) = room.game.as_mut() else {
        return reply_error(outbox, ErrorCode::InvalidState, "game isn't in progress");
    };

    let outcome = match game.play_move(
        &player_id,
        action,
        ctx.dictionary.as_ref(),
        ctx.config.exchange_counts_as_pass,
        ctx.config.max_consecutive_passes,
        &mut rng,
        now_ms(),
    ) {
        Ok(outcome) => outcome,
        Err(reason) => return reply_error_for_move(room, &player_id, reason),
    };

    room.touch(now_ms());

    for player in room.players() {
        player.send(ServerMsg::MoveAccepted {
            room_id: room.code().to_string(),
            move_summary: outcome.move_summary.clone(),
        });
    }
    broadcast_game_state(room);

    if !outcome.game_ended {
        let game = room.game.as_ref().expect("checked above");
        for player in room.players() {
            player.send(ServerMsg::TurnUpdate {
                room_id: room.code().to_string(),
                active_player_id: game.active_player_id().to_string(),
                turn_ends_at: game.turn_ends_at_ms(),
                version: game.version(),
            });
        }
        return;
    }

    room.set_status(RoomStatus::Finished);
    let game = room.game.as_ref().expect("checked above");

    let scores: std::collections::BTreeMap<String, i32> =
        game.scores().map(|(id, score)| (id.to_string(), score)).collect();
    let stats_by_player: std::collections::BTreeMap<String, crate::models::PlayerStats> = game
        .stats()
        .map(|(id, stats)| (id.to_string(), stats.clone()))
        .collect();
    let max_score = scores.values().copied().max().unwrap_or(0);
    let winner_ids: Vec<String> = scores
        .iter()
        .filter(|(_, &score)| score == max_score)
        .map(|(id, _)| id.clone())
        .collect();

    for player in room.players() {
        player.send(ServerMsg::GameEnded {
            room_id: room.code().to_string(),
            scores: scores.clone(),
            stats_by_player: stats_by_player.clone(),
            winner_ids: winner_ids.clone(),
        });
    }
    broadcast_room_update(room);
}

fn reply_error_for_move(room: &Room, player_id: &str, reason: ErrorCode) {
    if let Some(player) = room.player(player_id) {
        player.send(ServerMsg::InvalidMove {
            room_id: room.code().to_string(),
            reason,
        });
    }
}

async fn leave_room(ctx: &Context, session: &mut Session, room_id: String, outbox: &UnboundedSender<ServerMsg>) {
    use crate::models::RoomStatus;

    let Some(player_id) = session.player_id.clone() else {
        return reply_error(outbox, ErrorCode::NotInRoom, "no player id bound to this connection");
    };

    let is_active_mid_game = {
        let rooms = ctx.rooms.read().await;
        match rooms.get(&room_id) {
            Some(room) if room.status() == RoomStatus::Playing => room
                .game
                .as_ref()
                .map(|game| game.active_player_id() == player_id)
                .unwrap_or(false),
            _ => false,
        }
    };
    if is_active_mid_game {
        play_move(ctx, session, room_id.clone(), ActionTag::Pass, None, None, outbox).await;
    }

    let mut rooms = ctx.rooms.write().await;
    if let Some(room) = rooms.get_mut(&room_id) {
        if let Some(game) = room.game.as_mut() {
            game.remove_player(&player_id);
        }
    }

    match rooms.remove_player(&room_id, &player_id, now_ms()) {
        Some(outcome) if !outcome.room_deleted => {
            if let Some(room) = rooms.get(&room_id) {
                broadcast_room_update(room);
            }
        }
        _ => {}
    }

    if session.room_id.as_deref() == Some(room_id.as_str()) {
        session.room_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, handlers::Context};
    use tokio::sync::mpsc;

    fn ctx() -> Context {
        Context::new(Config::default())
    }

    #[tokio::test]
    async fn create_then_join_broadcasts_room_update() {
        let ctx = ctx();
        let mut host_session = Session::default();
        let (host_tx, mut host_rx) = mpsc::unbounded_channel();

        create_room(&ctx, &mut host_session, "alice".into(), None, None, &host_tx).await;
        assert!(host_session.room_id.is_some());
        let room_id = host_session.room_id.clone().unwrap();

        let mut guest_session = Session::default();
        let (guest_tx, _guest_rx) = mpsc::unbounded_channel();
        join_room(&ctx, &mut guest_session, room_id, "bob".into(), None, &guest_tx).await;
        assert!(guest_session.player_id.is_some());

        // Host's outbox should have received the initial FullState plus a
        // RoomUpdate broadcast from the guest joining.
        let _full_state = host_rx.recv().await.unwrap();
        let update = host_rx.recv().await.unwrap();
        assert!(matches!(update, ServerMsg::RoomUpdate { .. }));
    }

    #[tokio::test]
    async fn start_game_rejects_non_host() {
        let ctx = ctx();
        let mut host_session = Session::default();
        let (host_tx, _host_rx) = mpsc::unbounded_channel();
        create_room(&ctx, &mut host_session, "alice".into(), None, None, &host_tx).await;
        let room_id = host_session.room_id.clone().unwrap();

        let mut guest_session = Session::default();
        let (guest_tx, mut guest_rx) = mpsc::unbounded_channel();
        join_room(&ctx, &mut guest_session, room_id.clone(), "bob".into(), None, &guest_tx).await;
        let _ = guest_rx.recv().await; // FullState
        let _ = guest_rx.recv().await; // RoomUpdate

        start_game(&ctx, &mut guest_session, room_id, guest_session.player_id.clone(), &guest_tx).await;
        let msg = guest_rx.recv().await.unwrap();
        assert!(matches!(msg, ServerMsg::Error { code: ErrorCode::NotHost, .. }));
    }

    #[tokio::test]
    async fn leave_room_forces_pass_and_drops_player_from_game() {
        let ctx = ctx();
        let mut host_session = Session::default();
        let (host_tx, mut host_rx) = mpsc::unbounded_channel();
        create_room(&ctx, &mut host_session, "alice".into(), None, None, &host_tx).await;
        let room_id = host_session.room_id.clone().unwrap();
        let host_id = host_session.player_id.clone().unwrap();

        let mut guest_session = Session::default();
        let (guest_tx, mut guest_rx) = mpsc::unbounded_channel();
        join_room(&ctx, &mut guest_session, room_id.clone(), "bob".into(), None, &guest_tx).await;
        let guest_id = guest_session.player_id.clone().unwrap();
        toggle_ready(&ctx, &mut guest_session, room_id.clone(), true, Some(guest_id.clone()), &guest_tx).await;
        start_game(&ctx, &mut host_session, room_id.clone(), Some(host_id.clone()), &host_tx).await;

        while host_rx.try_recv().is_ok() {}
        while guest_rx.try_recv().is_ok() {}

        // The host is the active player; leaving mid-turn must force a
        // pass before being dropped, handing the turn to the remaining
        // player rather than leaving it pointed at a departed one.
        leave_room(&ctx, &mut host_session, room_id.clone(), &host_tx).await;

        let rooms = ctx.rooms.read().await;
        let room = rooms.get(&room_id).unwrap();
        assert!(!room.is_member(&host_id));
        let game = room.game.as_ref().unwrap();
        assert_eq!(game.active_player_id(), guest_id);
    }
}
