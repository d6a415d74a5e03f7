//! `WebSocket` stream of decision reports.
//!
//! A client connecting to `GET /ws/decisions` first receives the session's
//! latest [`DecisionReport`], if one exists, so a freshly opened dashboard
//! can render the current decision without polling. After that every new
//! report published on the broadcast channel is forwarded as a JSON text
//! frame. A client that falls behind skips the lagged reports.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use cordpull_types::DecisionReport;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming decision reports.
///
/// # Route
///
/// `GET /ws/decisions`
pub async fn ws_decisions(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| stream_decisions(socket, state))
}

/// Whether the socket is still usable after a send.
enum Delivery {
    Sent,
    Skipped,
    Disconnected,
}

/// Serialize `report` and send it as one text frame.
async fn send_report(socket: &mut WebSocket, report: &DecisionReport) -> Delivery {
    let json = match serde_json::to_string(report) {
        Ok(json) => json,
        Err(e) => {
            warn!(decision_id = %report.id, error = %e, "failed to serialize decision report");
            return Delivery::Skipped;
        }
    };
    if socket.send(Message::Text(json.into())).await.is_err() {
        return Delivery::Disconnected;
    }
    Delivery::Sent
}

async fn stream_decisions(mut socket: WebSocket, state: Arc<AppState>) {
    // Subscribe before snapshotting so no report published in between is lost.
    let mut rx = state.subscribe();
    let current = state.session.read().await.latest().cloned();

    debug!(
        subscribers = state.tx.receiver_count(),
        has_current = current.is_some(),
        "decision stream opened"
    );

    if let Some(report) = current
        && matches!(send_report(&mut socket, &report).await, Delivery::Disconnected)
    {
        debug!("decision stream closed before the current report was delivered");
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => match result {
                Ok(report) => {
                    if matches!(send_report(&mut socket, &report).await, Delivery::Disconnected) {
                        debug!(decision_id = %report.id, "decision stream closed (send failed)");
                        return;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "decision stream lagged, skipping ahead");
                }
                Err(RecvError::Closed) => {
                    debug!("broadcast channel closed, ending decision stream");
                    return;
                }
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Ping(data))) => {
                    if socket.send(Message::Pong(data)).await.is_err() {
                        return;
                    }
                }
                Some(Ok(Message::Close(_)) | Err(_)) | None => {
                    debug!("decision stream closed by client");
                    return;
                }
                // Clients have nothing to say on this channel.
                Some(Ok(_)) => {}
            },
        }
    }
}
