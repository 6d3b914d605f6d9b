//! The per-websocket task: decode frames into [`ClientMsg`], dispatch
//! them, and forward whatever the dispatch loop queues back out.

use super::{dispatch, Context, Session};
use crate::{error::ErrorCode, protocol::{ClientMsg, ServerMsg}};
use futures::{SinkExt, StreamExt};
use std::fmt::Debug;
use tokio::sync::mpsc;
use warp::ws::{Message, WebSocket};

/// Every `type` tag [`ClientMsg`] knows how to decode. Checked against an
/// envelope's `type` field before attempting a full decode, so an
/// unrecognized message kind is reported as `UNKNOWN_TYPE` rather than the
/// generic `BAD_PAYLOAD` serde would otherwise produce for it.
const KNOWN_TYPES: &[&str] = &[
    "createRoom",
    "joinRoom",
    "reconnect",
    "toggleReady",
    "startGame",
    "playMove",
    "leaveRoom",
];

/// Drives one client connection end to end: reads frames until the
/// socket closes, then unbinds whatever player/room it was attached to.
pub async fn accept(ws: WebSocket, ctx: Context) {
    let (mut ws_tx, mut ws_rx) = ws.split();
    let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel::<ServerMsg>();

    let forward = tokio::spawn(async move {
        while let Some(msg) = outbox_rx.recv().await {
            send(&mut ws_tx, &msg).await;
        }
    });

    let mut session = Session::default();

    while let Some(frame) = ws_rx.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => {
                log::error!("websocket error: {err}");
                break;
            }
        };
        if !frame.is_text() {
            continue;
        }

        let text = match frame.to_str() {
            Ok(text) => text,
            Err(()) => continue,
        };

        let envelope: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("bad payload: {err}");
                let _ = outbox_tx.send(ServerMsg::Error {
                    code: ErrorCode::BadPayload,
                    message: err.to_string(),
                });
                continue;
            }
        };

        if let Some(msg_type) = envelope.get("type").and_then(|t| t.as_str()) {
            if !KNOWN_TYPES.contains(&msg_type) {
                log::warn!("unknown message type: {msg_type}");
                let _ = outbox_tx.send(ServerMsg::Error {
                    code: ErrorCode::UnknownType,
                    message: format!("unknown message type: {msg_type}"),
                });
                continue;
            }
        }

        match serde_json::from_value::<ClientMsg>(envelope) {
            Ok(client_msg) => dispatch::handle(&ctx, &mut session, client_msg, &outbox_tx).await,
            Err(err) => {
                log::warn!("bad payload: {err}");
                let _ = outbox_tx.send(ServerMsg::Error {
                    code: ErrorCode::BadPayload,
                    message: err.to_string(),
                });
            }
        }
    }

    dispatch::disconnect(&ctx, &session).await;
    forward.abort();
}

async fn send<T>(ws_tx: &mut T, msg: &ServerMsg)
where
    T: futures::Sink<Message> + Unpin,
    <T as futures::Sink<Message>>::Error: Debug,
{
    let text = match serde_json::to_string(msg) {
        Ok(text) => text,
        Err(err) => {
            log::error!("failed to encode message: {err}");
            return;
        }
    };

    if let Err(err) = ws_tx.send(Message::text(text)).await {
        log::error!("failed to send message: {err:?}");
    }
}
