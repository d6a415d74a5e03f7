//! Error types for the cordpull-decision crate.
//!
//! The engine itself is a total function and never fails. These errors are
//! produced only by boundary validation, which hosts run before handing a
//! parameter snapshot to the engine.

/// A parameter snapshot that falls outside its documented domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// A bounded field is outside its allowed range.
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The value supplied.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// A real-valued field is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The value supplied.
        value: f64,
    },

    /// The loss-aversion coefficient is negative.
    #[error("loss_aversion_coefficient must be non-negative, got {value}")]
    NegativeLossAversion {
        /// The value supplied.
        value: f64,
    },
}
