//! One full decision: utility calculation followed by a stochastic draw.
//!
//! [`evaluate`] is a pure function of its inputs plus one draw from the
//! supplied [`RandomSource`]. It holds no state between calls, so concurrent
//! hosts can call it freely as long as each call brings its own source.

use cordpull_types::{
    DecisionOutcome, DisplayPercentages, EnvironmentState, SimulationParameters, UtilityBreakdown,
};
use tracing::debug;

use crate::selector::{self, RandomSource, Selection};
use crate::utility::{self, Utilities};

/// Everything produced by one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Breakdown of `Q_continue`.
    pub continue_breakdown: UtilityBreakdown,
    /// Breakdown of `Q_stop`.
    pub stop_breakdown: UtilityBreakdown,
    /// Distribution, roll, and chosen action.
    pub selection: Selection,
}

impl Evaluation {
    /// Collapse into the outcome record hosts render.
    pub const fn outcome(&self) -> DecisionOutcome {
        DecisionOutcome {
            q_continue_total: self.continue_breakdown.total,
            q_stop_total: self.stop_breakdown.total,
            prob_continue: self.selection.distribution.prob_continue,
            prob_stop: self.selection.distribution.prob_stop,
            selected_action: self.selection.action,
        }
    }

    /// Display-rounded probabilities.
    pub fn percentages(&self) -> DisplayPercentages {
        self.selection.distribution.percentages()
    }
}

/// Run the utility calculator and the stochastic selector.
pub fn evaluate<R>(
    params: &SimulationParameters,
    environment: EnvironmentState,
    source: &mut R,
) -> Evaluation
where
    R: RandomSource + ?Sized,
{
    let Utilities {
        continue_breakdown,
        stop_breakdown,
    } = utility::compute_utilities(params, environment);

    let selection = selector::select(continue_breakdown.total, stop_breakdown.total, source);

    debug!(
        environment = environment.code(),
        q_continue = continue_breakdown.total,
        q_stop = stop_breakdown.total,
        prob_continue = selection.distribution.prob_continue,
        prob_stop = selection.distribution.prob_stop,
        action = ?selection.action,
        "decision evaluated"
    );

    Evaluation {
        continue_breakdown,
        stop_breakdown,
        selection,
    }
}
