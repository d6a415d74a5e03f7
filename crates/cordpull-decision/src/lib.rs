//! Decision engine for the Cordpull stop-work model.
//!
//! A worker facing a possible hazard weighs continuing the task against
//! pulling the cord. This crate turns a parameter snapshot and an environment
//! state into two utility scores, a softmax distribution over the two
//! actions, and one sampled action. It holds no state and performs no I/O.
//!
//! # Modules
//!
//! - [`numeric`] -- Rounding policy, loss-aversion transform, percentages
//! - [`utility`] -- Utility calculator producing labelled breakdowns
//! - [`selector`] -- Softmax distribution, [`RandomSource`], and sampling
//! - [`engine`] -- [`evaluate`], the full calculator-then-selector pipeline
//! - [`validation`] -- Boundary checks hosts run before evaluating
//! - [`error`] -- [`ParameterError`]

pub mod engine;
pub mod error;
pub mod numeric;
pub mod selector;
pub mod utility;
pub mod validation;

// Re-export primary types at crate root for convenience.
pub use engine::{Evaluation, evaluate};
pub use error::ParameterError;
pub use numeric::{apply_loss_aversion, percent, round_half_away};
pub use selector::{
    ActionDistribution, FixedRoll, RandomSource, RngSource, Selection, TEMPERATURE, sample,
    select, softmax, thread_source,
};
pub use utility::{Utilities, compute_utilities, true_risk_probability};
pub use validation::{clamp_parameters, validate_parameters};
