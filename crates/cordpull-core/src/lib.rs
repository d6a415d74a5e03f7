//! Host layer for the Cordpull decision engine.
//!
//! The engine in `cordpull-decision` is a pure function of a parameter
//! snapshot and an environment state. This crate holds everything around it
//! that has state: configuration, the current snapshot, the bounded event
//! log, and the latest decision report.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `cordpull-config.yaml` into
//!   strongly-typed structs.
//! - [`display`] -- Signed scores, headlines, and event log lines.
//! - [`event_log`] -- Bounded newest-first [`EventLog`].
//! - [`session`] -- [`DecisionSession`], which re-runs the engine whenever
//!   a control changes.
//!
//! [`EventLog`]: event_log::EventLog
//! [`DecisionSession`]: session::DecisionSession

pub mod config;
pub mod display;
pub mod event_log;
pub mod session;
