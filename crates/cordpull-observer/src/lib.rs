//! Observer API server for the Cordpull decision session.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** to read and change the parameter snapshot and the
//!   environment state, trigger decisions, evaluate a snapshot without
//!   side effects, and read or clear the event log
//! - **`WebSocket` endpoint** (`/ws/decisions`) streaming every new
//!   decision report via [`tokio::sync::broadcast`]
//! - **Minimal HTML page** (`GET /`) showing the latest decision
//!
//! # Architecture
//!
//! A single [`DecisionSession`] sits behind a [`tokio::sync::RwLock`] in
//! [`AppState`]. Every control change re-runs the engine while holding
//! the write lock, so the stored report always matches the stored
//! snapshot.
//!
//! [`DecisionSession`]: cordpull_core::session::DecisionSession

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_observer};
pub use state::AppState;
