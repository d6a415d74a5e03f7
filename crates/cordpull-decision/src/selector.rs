//! Stochastic selector: softmax over the two utilities and a single draw.
//!
//! The distribution is a softmax with the fixed temperature [`TEMPERATURE`].
//! Scores are shifted by their maximum before exponentiating, so large
//! utilities never overflow. One uniform draw `roll` in `[0, 1)` then picks
//! the action: `roll < prob_stop` means [`WorkerAction::Stop`], anything else
//! means [`WorkerAction::Continue`].
//!
//! Randomness is injected through [`RandomSource`] so tests can pin the draw.

use cordpull_types::{DisplayPercentages, WorkerAction};
use rand::Rng;
use rand::rngs::ThreadRng;

use crate::numeric::{as_f64, percent};

/// Softmax temperature. Higher values flatten the distribution toward 50/50.
pub const TEMPERATURE: f64 = 15.0;

// ---------------------------------------------------------------------------
// Random sources
// ---------------------------------------------------------------------------

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Produce the next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Adapter that draws from any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// A source that always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRoll(pub f64);

impl RandomSource for FixedRoll {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Random source backed by the thread-local generator.
pub fn thread_source() -> RngSource<ThreadRng> {
    RngSource(rand::rng())
}

// ---------------------------------------------------------------------------
// Distribution and sampling
// ---------------------------------------------------------------------------

/// Probability distribution over the two actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionDistribution {
    /// Probability of continuing.
    pub prob_continue: f64,
    /// Probability of stopping.
    pub prob_stop: f64,
}

impl ActionDistribution {
    /// Whole-percent rendering of both probabilities.
    pub fn percentages(&self) -> DisplayPercentages {
        DisplayPercentages {
            continue_pct: percent(self.prob_continue),
            stop_pct: percent(self.prob_stop),
        }
    }
}

/// Result of one draw from an [`ActionDistribution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// The distribution that was sampled.
    pub distribution: ActionDistribution,
    /// The uniform value that was drawn.
    pub roll: f64,
    /// The chosen action.
    pub action: WorkerAction,
}

/// Softmax over `(q_continue, q_stop)` at the fixed [`TEMPERATURE`].
pub fn softmax(q_continue: i64, q_stop: i64) -> ActionDistribution {
    softmax_at(q_continue, q_stop, TEMPERATURE)
}

/// Softmax at an arbitrary positive temperature.
pub(crate) fn softmax_at(q_continue: i64, q_stop: i64, temperature: f64) -> ActionDistribution {
    let max_q = q_continue.max(q_stop);
    let exp_continue = (as_f64(q_continue.saturating_sub(max_q)) / temperature).exp();
    let exp_stop = (as_f64(q_stop.saturating_sub(max_q)) / temperature).exp();

    // One of the two exponents is exp(0) = 1, so the sum is at least 1.
    let sum = exp_continue + exp_stop;

    ActionDistribution {
        prob_continue: exp_continue / sum,
        prob_stop: exp_stop / sum,
    }
}

/// Pick an action with a single draw from `source`.
pub fn sample<R>(distribution: ActionDistribution, source: &mut R) -> Selection
where
    R: RandomSource + ?Sized,
{
    let roll = source.next_unit();
    let action = if roll < distribution.prob_stop {
        WorkerAction::Stop
    } else {
        WorkerAction::Continue
    };

    tracing::trace!(
        roll,
        prob_stop = distribution.prob_stop,
        action = ?action,
        "action sampled"
    );

    Selection {
        distribution,
        roll,
        action,
    }
}

/// Compute the softmax distribution and sample it in one step.
pub fn select<R>(q_continue: i64, q_stop: i64, source: &mut R) -> Selection
where
    R: RandomSource + ?Sized,
{
    sample(softmax(q_continue, q_stop), source)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn equal_utilities_split_evenly() {
        for q in [-500_i64, -1, 0, 7, 10_000] {
            let dist = softmax(q, q);
            assert!((dist.prob_continue - 0.5).abs() < TOLERANCE);
            assert!((dist.prob_stop - 0.5).abs() < TOLERANCE);
        }
    }

    #[test]
    fn probabilities_sum_to_one() {
        let scores = [-100_000_i64, -700, -67, -1, 0, 1, 15, 49, 700, 100_000];
        for &qc in &scores {
            for &qs in &scores {
                let dist = softmax(qc, qs);
                assert!((dist.prob_continue + dist.prob_stop - 1.0).abs() < TOLERANCE);
                assert!((0.0..=1.0).contains(&dist.prob_continue));
                assert!((0.0..=1.0).contains(&dist.prob_stop));
            }
        }
    }

    #[test]
    fn higher_utility_gets_majority() {
        let dist = softmax(49, -67);
        assert!(dist.prob_continue > 0.5);
        let dist = softmax(-458, 224);
        assert!(dist.prob_stop > 0.5);
    }

    #[test]
    fn known_softmax_value() {
        // A 15-point gap at T = 15 gives 1 / (1 + e^-1).
        let dist = softmax(15, 0);
        let expected = 1.0 / (1.0 + (-1.0_f64).exp());
        assert!((dist.prob_continue - expected).abs() < TOLERANCE);
    }

    #[test]
    fn extreme_gaps_do_not_overflow() {
        let dist = softmax(i64::MAX, i64::MIN);
        assert!(dist.prob_continue.is_finite());
        assert!(dist.prob_stop.is_finite());
        assert!((dist.prob_continue - 1.0).abs() < TOLERANCE);

        let dist = softmax(1_000_000, 999_990);
        assert!(dist.prob_continue > 0.5 && dist.prob_continue < 1.0);
    }

    #[test]
    fn temperature_scaling_preserves_majority() {
        let pairs = [(49_i64, -67_i64), (-458, 224), (3, 2), (0, 0)];
        for (qc, qs) in pairs {
            for temperature in [0.5, 1.0, 15.0, 150.0] {
                let dist = softmax_at(qc, qs, temperature);
                match qc.cmp(&qs) {
                    std::cmp::Ordering::Greater => assert!(dist.prob_continue > 0.5),
                    std::cmp::Ordering::Less => assert!(dist.prob_stop > 0.5),
                    std::cmp::Ordering::Equal => {
                        assert!((dist.prob_continue - 0.5).abs() < TOLERANCE);
                    }
                }
            }
        }
    }

    #[test]
    fn fixed_roll_below_prob_stop_stops() {
        let dist = ActionDistribution {
            prob_continue: 0.7,
            prob_stop: 0.3,
        };
        assert_eq!(sample(dist, &mut FixedRoll(0.0)).action, WorkerAction::Stop);
        assert_eq!(sample(dist, &mut FixedRoll(0.29)).action, WorkerAction::Stop);
        assert_eq!(sample(dist, &mut FixedRoll(0.3)).action, WorkerAction::Continue);
        assert_eq!(sample(dist, &mut FixedRoll(0.99)).action, WorkerAction::Continue);
    }

    #[test]
    fn sampling_uses_full_precision_probability() {
        // prob_stop rounds to 0% for display, but a tiny roll still stops.
        let dist = softmax(100, 0);
        assert_eq!(dist.percentages().stop_pct, 0);
        let selection = sample(dist, &mut FixedRoll(dist.prob_stop / 2.0));
        assert_eq!(selection.action, WorkerAction::Stop);
    }

    #[test]
    fn closure_source_is_accepted() {
        let mut rolls = vec![0.9, 0.1].into_iter();
        let mut source = move || rolls.next().unwrap_or(0.5);
        let dist = softmax(0, 0);
        assert_eq!(sample(dist, &mut source).action, WorkerAction::Continue);
        assert_eq!(sample(dist, &mut source).action, WorkerAction::Stop);
    }

    #[test]
    fn rng_source_stays_in_unit_interval() {
        let mut source = RngSource(SmallRng::seed_from_u64(42));
        for _ in 0..1000 {
            let roll = source.next_unit();
            assert!((0.0..1.0).contains(&roll));
        }
    }

    #[test]
    fn empirical_frequency_tracks_prob_stop() {
        let mut source = RngSource(SmallRng::seed_from_u64(7));
        let dist = softmax(0, 10);
        let trials = 20_000_u32;
        let stops = (0..trials)
            .filter(|_| sample(dist, &mut source).action == WorkerAction::Stop)
            .count();
        let observed = f64::from(u32::try_from(stops).unwrap_or(0)) / f64::from(trials);
        assert!((observed - dist.prob_stop).abs() < 0.02, "observed {observed}");
    }

    #[test]
    fn select_combines_softmax_and_draw() {
        let selection = select(49, -67, &mut FixedRoll(0.5));
        assert_eq!(selection.action, WorkerAction::Continue);
        assert!((selection.roll - 0.5).abs() < TOLERANCE);
        assert!(selection.distribution.prob_continue > 0.99);
    }
}
