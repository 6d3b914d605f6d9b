//! C6: background tasks spawned once at startup — the per-turn timeout
//! tick and the idle-room sweep.

use crate::{
    handlers::{dispatch, Context, Session},
    models::RoomStatus,
    protocol::{ActionTag, ClientMsg},
    time::now_ms,
};
use tokio::{sync::mpsc, time::interval};

/// Every [`Context::config`]`.turn_tick_interval`, forces a `pass` for any
/// room whose active player's turn has expired. Mirrors the teacher's
/// empty-game sweep: a single `tokio::spawn`ed loop owning its own
/// interval.
pub fn spawn_turn_timer(ctx: Context) {
    tokio::spawn(async move {
        let mut tick = interval(ctx.config.turn_tick_interval);
        loop {
            tick.tick().await;
            sweep_expired_turns(&ctx).await;
        }
    });
}

async fn sweep_expired_turns(ctx: &Context) {
    let now = now_ms();
    let expired: Vec<(String, String)> = {
        let rooms = ctx.rooms.read().await;
        rooms
            .codes()
            .into_iter()
            .filter_map(|code| {
                let room = rooms.get(&code)?;
                if room.status() != RoomStatus::Playing {
                    return None;
                }
                let game = room.game.as_ref()?;
                match now >= game.turn_ends_at_ms() {
                    true => Some((code, game.active_player_id().to_string())),
                    false => None,
                }
            })
            .collect()
    };

    for (room_id, active_player_id) in expired {
        log::info!("turn timeout in room {room_id} for player {active_player_id}");
        let mut session = Session {
            player_id: Some(active_player_id),
            room_id: Some(room_id),
        };
        // The timer forces a pass; nobody is listening on this throwaway
        // outbox, but `dispatch::handle` still needs somewhere to send
        // direct replies (there won't be any for a well-formed pass).
        let (outbox, _rx) = mpsc::unbounded_channel();
        dispatch::handle(
            ctx,
            &mut session,
            ClientMsg::PlayMove {
                room_id: session.room_id.clone().unwrap(),
                action: ActionTag::Pass,
                placements: None,
                tile_ids_to_exchange: None,
            },
            &outbox,
        )
        .await;
    }
}

/// Every [`Context::config`]`.sweep_interval`, deletes rooms that have had
/// no connected player for longer than `idle_room_threshold`.
pub fn spawn_idle_sweep(ctx: Context) {
    tokio::spawn(async move {
        let mut tick = interval(ctx.config.sweep_interval);
        loop {
            tick.tick().await;
            sweep_idle_rooms(&ctx).await;
        }
    });
}

async fn sweep_idle_rooms(ctx: &Context) {
    let now = now_ms();
    let threshold_ms = ctx.config.idle_room_threshold.as_millis() as u64;

    let mut rooms = ctx.rooms.write().await;
    let codes = rooms.codes();
    for code in codes {
        let Some(room) = rooms.get(&code) else { continue };
        let idle_for = now.saturating_sub(room.last_activity_ms());
        if !room.has_connected_player() && idle_for >= threshold_ms {
            log::info!("removing idle room {code}");
            rooms.remove_room(&code);
        }
    }
}
