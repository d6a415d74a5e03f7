//! Result structs exchanged between the engine and its host.
//!
//! Everything here is derived per evaluation and never persisted beyond the
//! host's bounded log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EnvironmentState, LogEntryKind, Severity, UtilityTermLabel, WorkerAction};
use crate::ids::{DecisionId, LogEntryId};
use crate::parameters::SimulationParameters;

// ---------------------------------------------------------------------------
// Utility breakdown
// ---------------------------------------------------------------------------

/// One labelled, already-rounded contribution to an action's utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UtilityTerm {
    /// Which sub-term this is.
    pub label: UtilityTermLabel,
    /// Signed integer value of the sub-term.
    #[ts(type = "number")]
    pub value: i64,
}

/// Ordered sub-terms of one action's utility, with their total.
///
/// `total` always equals the sum of `terms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UtilityBreakdown {
    /// The action this breakdown scores.
    pub action: WorkerAction,
    /// Sub-terms in their fixed display order.
    pub terms: Vec<UtilityTerm>,
    /// Sum of all sub-terms.
    #[ts(type = "number")]
    pub total: i64,
}

impl UtilityBreakdown {
    /// Build a breakdown from ordered terms, computing the total.
    pub fn from_terms(action: WorkerAction, terms: Vec<UtilityTerm>) -> Self {
        let total = terms
            .iter()
            .fold(0_i64, |acc, term| acc.saturating_add(term.value));
        Self {
            action,
            terms,
            total,
        }
    }

    /// Look up the value of a sub-term by label.
    pub fn value_of(&self, label: UtilityTermLabel) -> Option<i64> {
        self.terms
            .iter()
            .find(|term| term.label == label)
            .map(|term| term.value)
    }

    /// Recompute the sum of the sub-terms.
    pub fn sum_of_terms(&self) -> i64 {
        self.terms
            .iter()
            .fold(0_i64, |acc, term| acc.saturating_add(term.value))
    }
}

// ---------------------------------------------------------------------------
// Decision outcome
// ---------------------------------------------------------------------------

/// Scores, probabilities, and the sampled action of one decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DecisionOutcome {
    /// Total utility of continuing.
    #[ts(type = "number")]
    pub q_continue_total: i64,
    /// Total utility of stopping.
    #[ts(type = "number")]
    pub q_stop_total: i64,
    /// Softmax probability of continuing.
    pub prob_continue: f64,
    /// Softmax probability of stopping.
    pub prob_stop: f64,
    /// The action drawn from the distribution.
    pub selected_action: WorkerAction,
}

impl DecisionOutcome {
    /// Probability assigned to the action that was selected.
    pub const fn selected_probability(&self) -> f64 {
        match self.selected_action {
            WorkerAction::Continue => self.prob_continue,
            WorkerAction::Stop => self.prob_stop,
        }
    }
}

/// Probabilities rounded to whole percentages for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DisplayPercentages {
    /// `round(prob_continue * 100)`.
    pub continue_pct: u32,
    /// `round(prob_stop * 100)`.
    pub stop_pct: u32,
}

impl DisplayPercentages {
    /// Percentage of the given action.
    pub const fn for_action(&self, action: WorkerAction) -> u32 {
        match action {
            WorkerAction::Continue => self.continue_pct,
            WorkerAction::Stop => self.stop_pct,
        }
    }
}

/// Everything a host needs to render one decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DecisionReport {
    /// Identifier of this evaluation.
    pub id: DecisionId,
    /// Wall-clock time of the evaluation.
    pub evaluated_at: DateTime<Utc>,
    /// Environment the decision was made in.
    pub environment: EnvironmentState,
    /// Parameter snapshot used for the evaluation.
    pub parameters: SimulationParameters,
    /// Breakdown of `Q_continue`.
    pub continue_breakdown: UtilityBreakdown,
    /// Breakdown of `Q_stop`.
    pub stop_breakdown: UtilityBreakdown,
    /// Totals, probabilities, and the sampled action.
    pub outcome: DecisionOutcome,
    /// Display-rounded probabilities.
    pub percentages: DisplayPercentages,
}

// ---------------------------------------------------------------------------
// Host log and status
// ---------------------------------------------------------------------------

/// One line of the host event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEntry {
    /// Unique entry identifier.
    pub id: LogEntryId,
    /// When the entry was appended.
    pub timestamp: DateTime<Utc>,
    /// Category of the entry.
    pub kind: LogEntryKind,
    /// Human-readable message.
    pub message: String,
}

/// Static description of an environment state for status displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EnvironmentInfo {
    /// The state itself.
    pub state: EnvironmentState,
    /// Short code (`S0`..`S2`).
    pub code: String,
    /// Status label.
    pub label: String,
    /// Severity class.
    pub severity: Severity,
    /// Hazard probability bound to the state.
    pub hazard_probability: f64,
}

impl From<EnvironmentState> for EnvironmentInfo {
    fn from(state: EnvironmentState) -> Self {
        Self {
            state,
            code: state.code().to_owned(),
            label: state.label().to_owned(),
            severity: state.severity(),
            hazard_probability: state.hazard_probability(),
        }
    }
}
