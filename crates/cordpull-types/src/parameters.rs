//! Behavioral parameters supplied to the decision engine.
//!
//! A [`SimulationParameters`] value is an immutable snapshot for one
//! evaluation. The engine does not validate it; hosts check ranges at the
//! boundary before handing it over.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Inputs to one stop-work decision.
///
/// Defaults are the baseline scenario: a protected worker on a piece rate of
/// 50 under moderate peer pressure with a loss-aversion coefficient of 2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct SimulationParameters {
    /// Whether a formal stop-work protection policy exists.
    pub policy_active: bool,
    /// Immediate pay per unit produced.
    pub piece_rate: u32,
    /// Supervisor tolerance toward stoppages. Positive values offset the
    /// punishment for halting the line.
    pub supervisor_kpi: i32,
    /// Social cost of slowing down, in `[0, 1]`.
    pub peer_pressure: f64,
    /// Temporal discount applied to future risk (gamma), in `[0, 1]`.
    pub discount_factor: f64,
    /// Base punishment magnitude for an unwarranted stop.
    pub false_alarm_penalty_factor: u32,
    /// Probability of an accident given a true hazard, in `[0, 1]`.
    pub p_accident_base: f64,
    /// Standing that dampens false-alarm punishment, in `[0, 1]`.
    pub social_capital: f64,
    /// Multiplier applied to negative outcomes (lambda).
    pub loss_aversion_coefficient: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            policy_active: true,
            piece_rate: 50,
            supervisor_kpi: 10,
            peer_pressure: 0.5,
            discount_factor: 0.9,
            false_alarm_penalty_factor: 40,
            p_accident_base: 0.3,
            social_capital: 0.5,
            loss_aversion_coefficient: 2.0,
        }
    }
}
