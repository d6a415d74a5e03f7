//! The host-side decision session.
//!
//! A [`DecisionSession`] owns everything the engine deliberately does not:
//! the current parameter snapshot, the selected environment, the bounded
//! event log, and the most recent report. Every control change re-runs the
//! engine on the new snapshot, the same way a dashboard re-evaluates when a
//! slider moves.

use chrono::Utc;
use cordpull_decision::{
    ParameterError, RandomSource, evaluate, thread_source, validate_parameters,
};
use cordpull_types::{
    DecisionId, DecisionReport, EnvironmentState, LogEntry, LogEntryKind, SimulationParameters,
};
use tracing::{info, warn};

use crate::config::CordpullConfig;
use crate::display::decision_message;
use crate::event_log::EventLog;

/// Evaluate a snapshot and package the result as a [`DecisionReport`].
///
/// Does not touch any session state.
pub fn build_report<R>(
    params: &SimulationParameters,
    environment: EnvironmentState,
    source: &mut R,
) -> DecisionReport
where
    R: RandomSource + ?Sized,
{
    let evaluation = evaluate(params, environment, source);
    let outcome = evaluation.outcome();
    let percentages = evaluation.percentages();

    DecisionReport {
        id: DecisionId::new(),
        evaluated_at: Utc::now(),
        environment,
        parameters: *params,
        continue_breakdown: evaluation.continue_breakdown,
        stop_breakdown: evaluation.stop_breakdown,
        outcome,
        percentages,
    }
}

/// Mutable host state around the stateless engine.
#[derive(Debug, Clone)]
pub struct DecisionSession {
    parameters: SimulationParameters,
    environment: EnvironmentState,
    log: EventLog,
    latest: Option<DecisionReport>,
}

impl DecisionSession {
    /// Create a session with the given snapshot and log capacity.
    ///
    /// No decision is run; call [`DecisionSession::run`] for the initial one.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if `parameters` is out of domain.
    pub fn new(
        parameters: SimulationParameters,
        environment: EnvironmentState,
        log_capacity: usize,
    ) -> Result<Self, ParameterError> {
        validate_parameters(&parameters)?;
        Ok(Self {
            parameters,
            environment,
            log: EventLog::new(log_capacity),
            latest: None,
        })
    }

    /// Create a session from the scenario and log sections of the config.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the configured parameters are out of
    /// domain.
    pub fn from_config(config: &CordpullConfig) -> Result<Self, ParameterError> {
        Self::new(
            config.scenario.parameters,
            config.scenario.environment,
            config.event_log.capacity,
        )
    }

    /// Current parameter snapshot.
    pub const fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    /// Current environment state.
    pub const fn environment(&self) -> EnvironmentState {
        self.environment
    }

    /// The event log.
    pub const fn log(&self) -> &EventLog {
        &self.log
    }

    /// The most recent report, if any decision has run.
    pub const fn latest(&self) -> Option<&DecisionReport> {
        self.latest.as_ref()
    }

    /// Run one decision on the current snapshot.
    ///
    /// The report is stored as the latest one and a line describing the
    /// sampled action is prepended to the event log.
    pub fn run<R>(&mut self, source: &mut R) -> DecisionReport
    where
        R: RandomSource + ?Sized,
    {
        let report = build_report(&self.parameters, self.environment, source);
        let message = decision_message(&report);

        info!(
            decision_id = %report.id,
            environment = self.environment.code(),
            action = ?report.outcome.selected_action,
            prob_stop = report.outcome.prob_stop,
            "{message}"
        );

        self.log
            .push(LogEntryKind::from(report.outcome.selected_action), message);
        self.latest = Some(report.clone());
        report
    }

    /// Run one decision using the thread-local generator.
    pub fn run_with_thread_rng(&mut self) -> DecisionReport {
        let mut source = thread_source();
        self.run(&mut source)
    }

    /// Validate and replace the parameters, then re-run.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] and leaves the session untouched if the
    /// new parameters are out of domain.
    pub fn set_parameters<R>(
        &mut self,
        parameters: SimulationParameters,
        source: &mut R,
    ) -> Result<DecisionReport, ParameterError>
    where
        R: RandomSource + ?Sized,
    {
        if let Err(e) = validate_parameters(&parameters) {
            warn!(error = %e, "rejected parameter update");
            return Err(e);
        }
        self.parameters = parameters;
        Ok(self.run(source))
    }

    /// Replace the environment state, then re-run.
    pub fn set_environment<R>(
        &mut self,
        environment: EnvironmentState,
        source: &mut R,
    ) -> DecisionReport
    where
        R: RandomSource + ?Sized,
    {
        if environment != self.environment {
            info!(
                from = self.environment.code(),
                to = environment.code(),
                "environment changed"
            );
        }
        self.environment = environment;
        self.run(source)
    }

    /// Clear the event log, leaving only the "cleared" notice.
    pub fn clear_log(&mut self) -> LogEntry {
        info!(discarded = self.log.len(), "event log cleared");
        self.log.clear()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cordpull_decision::FixedRoll;
    use cordpull_types::WorkerAction;

    use super::*;
    use crate::event_log::CLEARED_MESSAGE;

    fn session() -> DecisionSession {
        DecisionSession::from_config(&CordpullConfig::default()).unwrap()
    }

    #[test]
    fn new_session_has_no_report() {
        let session = session();
        assert!(session.latest().is_none());
        assert!(session.log().is_empty());
        assert_eq!(session.environment(), EnvironmentState::Normal);
    }

    #[test]
    fn rejects_invalid_initial_parameters() {
        let params = SimulationParameters {
            p_accident_base: 2.0,
            ..SimulationParameters::default()
        };
        assert!(DecisionSession::new(params, EnvironmentState::Normal, 50).is_err());
    }

    #[test]
    fn run_logs_continue_under_normal_operations() {
        let mut session = session();
        let report = session.run(&mut FixedRoll(0.5));

        assert_eq!(report.outcome.selected_action, WorkerAction::Continue);
        assert_eq!(session.latest().map(|r| r.id), Some(report.id));

        let entry = session.log().iter().next().cloned().unwrap();
        assert_eq!(entry.kind, LogEntryKind::DecisionContinue);
        assert_eq!(
            entry.message,
            "Worker CONTINUED. (100% statistical probability in S0)"
        );
    }

    #[test]
    fn environment_change_reruns_and_logs_stop() {
        let mut session = session();
        let report =
            session.set_environment(EnvironmentState::ImminentDanger, &mut FixedRoll(0.5));

        assert_eq!(report.environment, EnvironmentState::ImminentDanger);
        assert_eq!(report.outcome.selected_action, WorkerAction::Stop);
        let message = session.log().iter().next().map(|e| e.message.clone());
        assert_eq!(
            message.as_deref(),
            Some("Worker STOPPED. (100% statistical probability in S2)")
        );
    }

    #[test]
    fn parameter_update_is_validated() {
        let mut session = session();
        let bad = SimulationParameters {
            peer_pressure: 1.2,
            ..SimulationParameters::default()
        };
        assert!(session.set_parameters(bad, &mut FixedRoll(0.5)).is_err());
        assert_eq!(*session.parameters(), SimulationParameters::default());
        assert!(session.log().is_empty());

        let good = SimulationParameters {
            policy_active: false,
            ..SimulationParameters::default()
        };
        let report = session.set_parameters(good, &mut FixedRoll(0.5));
        assert!(report.is_ok());
        assert!(!session.parameters().policy_active);
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn report_snapshots_inputs() {
        let mut session = session();
        let report = session.run(&mut FixedRoll(0.5));
        assert_eq!(report.parameters, *session.parameters());
        assert_eq!(report.continue_breakdown.total, report.outcome.q_continue_total);
        assert_eq!(report.stop_breakdown.total, report.outcome.q_stop_total);
    }

    #[test]
    fn clear_log_keeps_notice() {
        let mut session = session();
        session.run(&mut FixedRoll(0.5));
        session.run(&mut FixedRoll(0.5));
        let notice = session.clear_log();
        assert_eq!(notice.message, CLEARED_MESSAGE);
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn log_is_bounded_by_capacity() {
        let mut session =
            DecisionSession::new(SimulationParameters::default(), EnvironmentState::Normal, 3)
                .unwrap();
        for _ in 0..10 {
            session.run_with_thread_rng();
        }
        assert_eq!(session.log().len(), 3);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut first = session();
        let mut second = session();
        first.set_environment(EnvironmentState::AmbiguousAnomaly, &mut FixedRoll(0.0));
        second.set_environment(EnvironmentState::AmbiguousAnomaly, &mut FixedRoll(0.0));

        let mut a = cordpull_decision::RngSource(SmallRng::seed_from_u64(11));
        let mut b = cordpull_decision::RngSource(SmallRng::seed_from_u64(11));
        for _ in 0..20 {
            assert_eq!(
                first.run(&mut a).outcome.selected_action,
                second.run(&mut b).outcome.selected_action
            );
        }
    }
}
