//! Enumeration types for the Cordpull decision model.
//!
//! The environment table is closed and static: three states, each bound to a
//! fixed hazard probability. The remaining enums name the two actions, the
//! labelled utility sub-terms, and the kinds of host log entries.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// The observed condition of the line at the moment of decision.
///
/// | State | Code | `p_hazard` |
/// |-------|------|------------|
/// | `Normal` | S0 | 0.01 |
/// | `AmbiguousAnomaly` | S1 | 0.50 |
/// | `ImminentDanger` | S2 | 0.95 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EnvironmentState {
    /// Routine operations, almost certainly no hazard.
    #[default]
    #[serde(alias = "S0")]
    Normal,
    /// Something looks off; a coin flip whether it is real.
    #[serde(alias = "S1")]
    AmbiguousAnomaly,
    /// Strong evidence of an actual hazard.
    #[serde(alias = "S2")]
    ImminentDanger,
}

impl EnvironmentState {
    /// Every state, in escalation order.
    pub const ALL: [Self; 3] = [Self::Normal, Self::AmbiguousAnomaly, Self::ImminentDanger];

    /// Probability that the observed anomaly is a genuine hazard.
    pub const fn hazard_probability(self) -> f64 {
        match self {
            Self::Normal => 0.01,
            Self::AmbiguousAnomaly => 0.50,
            Self::ImminentDanger => 0.95,
        }
    }

    /// Short code used in log lines (`S0`, `S1`, `S2`).
    pub const fn code(self) -> &'static str {
        match self {
            Self::Normal => "S0",
            Self::AmbiguousAnomaly => "S1",
            Self::ImminentDanger => "S2",
        }
    }

    /// Human-readable status label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "S0: Normal Operations",
            Self::AmbiguousAnomaly => "S1: Ambiguous Anomaly",
            Self::ImminentDanger => "S2: Imminent Danger",
        }
    }

    /// Severity class for status indicators.
    pub const fn severity(self) -> Severity {
        match self {
            Self::Normal => Severity::Normal,
            Self::AmbiguousAnomaly => Severity::Warning,
            Self::ImminentDanger => Severity::Danger,
        }
    }
}

/// Visual severity of an environment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Severity {
    /// Nothing unusual.
    Normal,
    /// Worth attention.
    Warning,
    /// Immediate danger.
    Danger,
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The two actions available to the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum WorkerAction {
    /// Keep the line moving.
    Continue,
    /// Pull the cord and halt the line.
    Stop,
}

// ---------------------------------------------------------------------------
// Utility terms
// ---------------------------------------------------------------------------

/// Label of one sub-term of an action's utility.
///
/// The first three belong to `Q_continue`, the last four to `Q_stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum UtilityTermLabel {
    /// Immediate piece-rate pay.
    Production,
    /// Social reward for keeping pace.
    PeerSpeed,
    /// Discounted, loss-amplified expected accident cost.
    DiscountedRisk,
    /// Benefit of avoiding the same risk by stopping.
    HazardAvoided,
    /// Administrative and social punishment for halting the line.
    SupervisorPeerPenalty,
    /// Expected punishment for an unwarranted stop.
    FalseAlarmRisk,
    /// Penalty for lacking formal stop-work protection.
    PolicyPenalty,
}

impl UtilityTermLabel {
    /// Display name of the term.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Production => "Production",
            Self::PeerSpeed => "Peer Speed",
            Self::DiscountedRisk => "Discounted Risk",
            Self::HazardAvoided => "Hazard Avoided",
            Self::SupervisorPeerPenalty => "Super+Peer Penalty",
            Self::FalseAlarmRisk => "False Alarm Risk",
            Self::PolicyPenalty => "Policy Penalty",
        }
    }
}

// ---------------------------------------------------------------------------
// Event log
// ---------------------------------------------------------------------------

/// Kind of a host event log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LogEntryKind {
    /// Housekeeping message from the host.
    System,
    /// The worker pulled the cord.
    DecisionStop,
    /// The worker kept going.
    DecisionContinue,
}

impl From<WorkerAction> for LogEntryKind {
    fn from(action: WorkerAction) -> Self {
        match action {
            WorkerAction::Continue => Self::DecisionContinue,
            WorkerAction::Stop => Self::DecisionStop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_table_is_fixed() {
        let table: Vec<(EnvironmentState, f64)> = EnvironmentState::ALL
            .iter()
            .map(|s| (*s, s.hazard_probability()))
            .collect();
        assert_eq!(
            table,
            vec![
                (EnvironmentState::Normal, 0.01),
                (EnvironmentState::AmbiguousAnomaly, 0.50),
                (EnvironmentState::ImminentDanger, 0.95),
            ]
        );
    }

    #[test]
    fn codes_and_labels_agree() {
        for state in EnvironmentState::ALL {
            assert!(state.label().starts_with(state.code()));
        }
    }

    #[test]
    fn severity_escalates() {
        assert_eq!(EnvironmentState::Normal.severity(), Severity::Normal);
        assert_eq!(EnvironmentState::AmbiguousAnomaly.severity(), Severity::Warning);
        assert_eq!(EnvironmentState::ImminentDanger.severity(), Severity::Danger);
    }

    #[test]
    fn environment_accepts_short_codes() {
        let parsed: Result<EnvironmentState, _> = serde_json::from_str("\"S2\"");
        assert_eq!(parsed.ok(), Some(EnvironmentState::ImminentDanger));
        let parsed: Result<EnvironmentState, _> = serde_json::from_str("\"AmbiguousAnomaly\"");
        assert_eq!(parsed.ok(), Some(EnvironmentState::AmbiguousAnomaly));
    }

    #[test]
    fn log_kind_follows_action() {
        assert_eq!(LogEntryKind::from(WorkerAction::Stop), LogEntryKind::DecisionStop);
        assert_eq!(
            LogEntryKind::from(WorkerAction::Continue),
            LogEntryKind::DecisionContinue
        );
    }
}
