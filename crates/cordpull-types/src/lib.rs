//! Shared type definitions for the Cordpull stop-work decision model.
//!
//! This crate is the single source of truth for the data exchanged between
//! the decision engine and its hosts. Types flow downstream to `TypeScript`
//! via `ts-rs` for dashboard front ends.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for decisions and log entries
//! - [`enums`] -- Environment states, actions, utility term labels, log kinds
//! - [`parameters`] -- The behavioral parameter snapshot for one decision
//! - [`structs`] -- Breakdowns, outcomes, reports, and log entries

pub mod enums;
pub mod ids;
pub mod parameters;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EnvironmentState, LogEntryKind, Severity, UtilityTermLabel, WorkerAction};
pub use ids::{DecisionId, LogEntryId};
pub use parameters::SimulationParameters;
pub use structs::{
    DecisionOutcome, DecisionReport, DisplayPercentages, EnvironmentInfo, LogEntry,
    UtilityBreakdown, UtilityTerm,
};
