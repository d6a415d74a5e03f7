//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the decision session behind a read-write lock and a
//! broadcast channel that pushes every new [`DecisionReport`] to connected
//! `WebSocket` clients.

use std::sync::Arc;

use cordpull_core::session::DecisionSession;
use cordpull_types::DecisionReport;
use tokio::sync::{RwLock, broadcast};

/// Capacity of the broadcast channel for decision reports.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 64;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for decision reports.
    pub tx: broadcast::Sender<DecisionReport>,
    /// The decision session every handler reads and mutates.
    pub session: Arc<RwLock<DecisionSession>>,
}

impl AppState {
    /// Wrap a session in fresh shared state.
    pub fn new(session: DecisionSession) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Subscribe to the decision broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<DecisionReport> {
        self.tx.subscribe()
    }

    /// Publish a report to all connected clients.
    ///
    /// Returns the number of receivers that received the message.
    /// Returns 0 if no clients are connected (this is not an error).
    pub fn broadcast(&self, report: &DecisionReport) -> usize {
        // send returns Err only when there are zero receivers,
        // which is normal when no WebSocket clients are connected.
        self.tx.send(report.clone()).unwrap_or(0)
    }
}
