//! Utility calculator: the perceived value of continuing and of stopping.
//!
//! Both scores are built from labelled sub-terms, each rounded on its own
//! before summation so the breakdown reconciles exactly with the total.
//!
//! # `Q_continue`
//!
//! | Term | Formula |
//! |------|---------|
//! | Production | `piece_rate` |
//! | `PeerSpeed` | `round(10 * peer_pressure)` |
//! | `DiscountedRisk` | `L(round(-1000 * risk * gamma))` |
//!
//! # `Q_stop`
//!
//! | Term | Formula |
//! |------|---------|
//! | `HazardAvoided` | `round(1000 * risk * gamma)` |
//! | `SupervisorPeerPenalty` | `L(-20 - round(10 * peer_pressure) + supervisor_kpi)` |
//! | `FalseAlarmRisk` | `L(round((1 - p_hazard) * -(factor * (1 - social_capital))))` |
//! | `PolicyPenalty` | `L(0)` with a policy, `L(-50)` without |
//!
//! where `risk = p_hazard * p_accident_base` and `L` is
//! [`apply_loss_aversion`].

use cordpull_types::{
    EnvironmentState, SimulationParameters, UtilityBreakdown, UtilityTerm, UtilityTermLabel,
    WorkerAction,
};

use crate::numeric::{apply_loss_aversion, round_half_away};

/// Scale applied to the accident probability to express it in utility units.
const RISK_SCALE: f64 = 1000.0;

/// Scale applied to peer pressure for the speed reward.
const PEER_SCALE: f64 = 10.0;

/// Base administrative punishment for halting the line.
const BASE_STOP_PENALTY: i64 = -20;

/// Penalty for stopping without formal stop-work protection.
const MISSING_POLICY_PENALTY: i64 = -50;

/// Both utility breakdowns for one parameter snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utilities {
    /// Breakdown of `Q_continue`.
    pub continue_breakdown: UtilityBreakdown,
    /// Breakdown of `Q_stop`.
    pub stop_breakdown: UtilityBreakdown,
}

impl Utilities {
    /// Total utility of continuing.
    pub const fn q_continue(&self) -> i64 {
        self.continue_breakdown.total
    }

    /// Total utility of stopping.
    pub const fn q_stop(&self) -> i64 {
        self.stop_breakdown.total
    }
}

/// Objective probability of an accident this period.
pub fn true_risk_probability(params: &SimulationParameters, environment: EnvironmentState) -> f64 {
    environment.hazard_probability() * params.p_accident_base
}

/// Compute both utility breakdowns.
///
/// Pure and deterministic: identical inputs always produce identical output.
pub fn compute_utilities(
    params: &SimulationParameters,
    environment: EnvironmentState,
) -> Utilities {
    Utilities {
        continue_breakdown: continue_breakdown(params, environment),
        stop_breakdown: stop_breakdown(params, environment),
    }
}

/// Breakdown of the perceived value of keeping the line moving.
pub fn continue_breakdown(
    params: &SimulationParameters,
    environment: EnvironmentState,
) -> UtilityBreakdown {
    let risk = true_risk_probability(params, environment);
    let lambda = params.loss_aversion_coefficient;

    let production = i64::from(params.piece_rate);
    let peer_speed = peer_speed_reward(params);
    let discounted_risk = apply_loss_aversion(
        round_half_away(-RISK_SCALE * risk * params.discount_factor),
        lambda,
    );

    UtilityBreakdown::from_terms(
        WorkerAction::Continue,
        vec![
            UtilityTerm {
                label: UtilityTermLabel::Production,
                value: production,
            },
            UtilityTerm {
                label: UtilityTermLabel::PeerSpeed,
                value: peer_speed,
            },
            UtilityTerm {
                label: UtilityTermLabel::DiscountedRisk,
                value: discounted_risk,
            },
        ],
    )
}

/// Breakdown of the perceived value of pulling the cord.
pub fn stop_breakdown(
    params: &SimulationParameters,
    environment: EnvironmentState,
) -> UtilityBreakdown {
    let risk = true_risk_probability(params, environment);
    let lambda = params.loss_aversion_coefficient;

    let hazard_avoided = round_half_away(RISK_SCALE * risk * params.discount_factor);

    let base_stop_penalty = BASE_STOP_PENALTY
        .saturating_sub(peer_speed_reward(params))
        .saturating_add(i64::from(params.supervisor_kpi));
    let supervisor_peer = apply_loss_aversion(base_stop_penalty, lambda);

    let p_false_alarm = 1.0 - environment.hazard_probability();
    let buffered_penalty =
        f64::from(params.false_alarm_penalty_factor) * (1.0 - params.social_capital);
    let false_alarm = apply_loss_aversion(round_half_away(p_false_alarm * -buffered_penalty), lambda);

    let policy = apply_loss_aversion(
        if params.policy_active {
            0
        } else {
            MISSING_POLICY_PENALTY
        },
        lambda,
    );

    UtilityBreakdown::from_terms(
        WorkerAction::Stop,
        vec![
            UtilityTerm {
                label: UtilityTermLabel::HazardAvoided,
                value: hazard_avoided,
            },
            UtilityTerm {
                label: UtilityTermLabel::SupervisorPeerPenalty,
                value: supervisor_peer,
            },
            UtilityTerm {
                label: UtilityTermLabel::FalseAlarmRisk,
                value: false_alarm,
            },
            UtilityTerm {
                label: UtilityTermLabel::PolicyPenalty,
                value: policy,
            },
        ],
    )
}

/// Social reward for keeping pace, in `[0, 10]` for valid peer pressure.
fn peer_speed_reward(params: &SimulationParameters) -> i64 {
    round_half_away(PEER_SCALE * params.peer_pressure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> SimulationParameters {
        SimulationParameters {
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

    fn labels(breakdown: &UtilityBreakdown) -> Vec<UtilityTermLabel> {
        breakdown.terms.iter().map(|t| t.label).collect()
    }

    #[test]
    fn normal_operations_breakdown() {
        let utilities = compute_utilities(&baseline(), EnvironmentState::Normal);
        let cont = &utilities.continue_breakdown;
        let stop = &utilities.stop_breakdown;

        assert_eq!(cont.value_of(UtilityTermLabel::Production), Some(50));
        assert_eq!(cont.value_of(UtilityTermLabel::PeerSpeed), Some(5));
        // round(-1000 * 0.003 * 0.9) = -3, doubled by loss aversion.
        assert_eq!(cont.value_of(UtilityTermLabel::DiscountedRisk), Some(-6));
        assert_eq!(utilities.q_continue(), 49);

        assert_eq!(stop.value_of(UtilityTermLabel::HazardAvoided), Some(3));
        // -20 - 5 + 10 = -15, doubled.
        assert_eq!(stop.value_of(UtilityTermLabel::SupervisorPeerPenalty), Some(-30));
        // round(0.99 * -20) = -20, doubled.
        assert_eq!(stop.value_of(UtilityTermLabel::FalseAlarmRisk), Some(-40));
        assert_eq!(stop.value_of(UtilityTermLabel::PolicyPenalty), Some(0));
        assert_eq!(utilities.q_stop(), -67);
    }

    #[test]
    fn terms_are_in_fixed_order() {
        let utilities = compute_utilities(&baseline(), EnvironmentState::AmbiguousAnomaly);
        assert_eq!(
            labels(&utilities.continue_breakdown),
            vec![
                UtilityTermLabel::Production,
                UtilityTermLabel::PeerSpeed,
                UtilityTermLabel::DiscountedRisk,
            ]
        );
        assert_eq!(
            labels(&utilities.stop_breakdown),
            vec![
                UtilityTermLabel::HazardAvoided,
                UtilityTermLabel::SupervisorPeerPenalty,
                UtilityTermLabel::FalseAlarmRisk,
                UtilityTermLabel::PolicyPenalty,
            ]
        );
    }

    #[test]
    fn breakdowns_reconcile_with_totals() {
        for environment in EnvironmentState::ALL {
            for lambda in [1.0, 1.5, 2.0, 2.25, 3.7] {
                for peer in [0.0, 0.15, 0.25, 0.45, 1.0] {
                    let params = SimulationParameters {
                        peer_pressure: peer,
                        loss_aversion_coefficient: lambda,
                        social_capital: 0.35,
                        ..baseline()
                    };
                    let utilities = compute_utilities(&params, environment);
                    assert_eq!(
                        utilities.continue_breakdown.sum_of_terms(),
                        utilities.q_continue()
                    );
                    assert_eq!(utilities.stop_breakdown.sum_of_terms(), utilities.q_stop());
                }
            }
        }
    }

    #[test]
    fn risk_terms_are_symmetric_before_loss_aversion() {
        for environment in EnvironmentState::ALL {
            for gamma in [0.0, 0.1, 0.5, 0.9, 1.0] {
                let params = SimulationParameters {
                    discount_factor: gamma,
                    loss_aversion_coefficient: 1.0,
                    ..baseline()
                };
                let utilities = compute_utilities(&params, environment);
                let risk = utilities
                    .continue_breakdown
                    .value_of(UtilityTermLabel::DiscountedRisk)
                    .unwrap_or_default();
                let avoided = utilities
                    .stop_breakdown
                    .value_of(UtilityTermLabel::HazardAvoided)
                    .unwrap_or_default();
                assert_eq!(risk, -avoided, "{environment:?} gamma = {gamma}");
            }
        }
    }

    #[test]
    fn imminent_danger_amplifies_risk() {
        let normal = compute_utilities(&baseline(), EnvironmentState::Normal);
        let danger = compute_utilities(&baseline(), EnvironmentState::ImminentDanger);

        let risk = danger
            .continue_breakdown
            .value_of(UtilityTermLabel::DiscountedRisk)
            .unwrap_or_default();
        let avoided = danger
            .stop_breakdown
            .value_of(UtilityTermLabel::HazardAvoided)
            .unwrap_or_default();

        // 1000 * 0.285 * 0.9 is about 256.5 before rounding.
        assert!((256..=257).contains(&avoided));
        assert!(risk <= -512);
        assert!(danger.q_stop() > danger.q_continue());
        assert!(normal.q_continue() > normal.q_stop());
    }

    #[test]
    fn missing_policy_costs_loss_amplified_fifty() {
        let with_policy = compute_utilities(&baseline(), EnvironmentState::AmbiguousAnomaly);
        let without = compute_utilities(
            &SimulationParameters {
                policy_active: false,
                ..baseline()
            },
            EnvironmentState::AmbiguousAnomaly,
        );
        assert_eq!(
            without.stop_breakdown.value_of(UtilityTermLabel::PolicyPenalty),
            Some(-100)
        );
        assert_eq!(with_policy.q_stop() - without.q_stop(), 100);
        assert_eq!(with_policy.q_continue(), without.q_continue());
    }

    #[test]
    fn full_social_capital_removes_false_alarm_penalty() {
        let params = SimulationParameters {
            social_capital: 1.0,
            ..baseline()
        };
        let utilities = compute_utilities(&params, EnvironmentState::Normal);
        assert_eq!(
            utilities.stop_breakdown.value_of(UtilityTermLabel::FalseAlarmRisk),
            Some(0)
        );
    }

    #[test]
    fn zero_social_capital_applies_full_factor() {
        let params = SimulationParameters {
            social_capital: 0.0,
            loss_aversion_coefficient: 1.0,
            ..baseline()
        };
        let utilities = compute_utilities(&params, EnvironmentState::Normal);
        // round(0.99 * -40) = round(-39.6) = -40
        assert_eq!(
            utilities.stop_breakdown.value_of(UtilityTermLabel::FalseAlarmRisk),
            Some(-40)
        );
    }

    #[test]
    fn lenient_supervisor_turns_penalty_positive() {
        let params = SimulationParameters {
            supervisor_kpi: 40,
            ..baseline()
        };
        let utilities = compute_utilities(&params, EnvironmentState::Normal);
        // -20 - 5 + 40 = 15, a gain, so loss aversion leaves it alone.
        assert_eq!(
            utilities
                .stop_breakdown
                .value_of(UtilityTermLabel::SupervisorPeerPenalty),
            Some(15)
        );
    }

    #[test]
    fn peer_speed_caps_at_ten() {
        let params = SimulationParameters {
            peer_pressure: 1.0,
            ..baseline()
        };
        let utilities = compute_utilities(&params, EnvironmentState::Normal);
        assert_eq!(
            utilities.continue_breakdown.value_of(UtilityTermLabel::PeerSpeed),
            Some(10)
        );
    }

    #[test]
    fn calculator_is_deterministic() {
        let params = SimulationParameters {
            peer_pressure: 0.37,
            discount_factor: 0.63,
            ..baseline()
        };
        let first = compute_utilities(&params, EnvironmentState::AmbiguousAnomaly);
        for _ in 0..20 {
            assert_eq!(
                compute_utilities(&params, EnvironmentState::AmbiguousAnomaly),
                first
            );
        }
    }

    #[test]
    fn out_of_domain_inputs_do_not_panic() {
        let params = SimulationParameters {
            peer_pressure: -4.0,
            discount_factor: f64::NAN,
            social_capital: 7.5,
            loss_aversion_coefficient: f64::INFINITY,
            supervisor_kpi: i32::MIN,
            piece_rate: u32::MAX,
            ..baseline()
        };
        let utilities = compute_utilities(&params, EnvironmentState::ImminentDanger);
        assert_eq!(
            utilities.continue_breakdown.sum_of_terms(),
            utilities.q_continue()
        );
    }
}
