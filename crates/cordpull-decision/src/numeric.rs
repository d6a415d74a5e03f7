//! Shared numeric helpers: the rounding policy and the loss-aversion transform.
//!
//! Every sub-term of the utility model is rounded on its own with
//! [`round_half_away`] so that breakdowns reconcile exactly with totals.
//! Halves round away from zero, which makes `round(-x) == -round(x)` and keeps
//! the risk terms of the two actions symmetric.

/// Round to the nearest integer, halves away from zero.
///
/// Non-finite inputs never panic: NaN maps to 0 and infinities saturate.
#[allow(clippy::cast_possible_truncation)]
pub fn round_half_away(value: f64) -> i64 {
    // `as` saturates on overflow and maps NaN to zero.
    value.round() as i64
}

/// Widen an integer utility into floating point.
#[allow(clippy::cast_precision_loss)]
pub const fn as_f64(value: i64) -> f64 {
    value as f64
}

/// Apply prospect-theory loss aversion to a signed outcome.
///
/// Losses are multiplied by `lambda` and rounded; gains and zero pass through
/// unchanged.
///
/// ```text
/// L(v) = round(v * lambda)   if v < 0
/// L(v) = v                   otherwise
/// ```
pub fn apply_loss_aversion(value: i64, lambda: f64) -> i64 {
    if value < 0 {
        round_half_away(as_f64(value) * lambda)
    } else {
        value
    }
}

/// Convert a probability to a whole display percentage in `[0, 100]`.
pub fn percent(probability: f64) -> u32 {
    let rounded = round_half_away(probability * 100.0).clamp(0, 100);
    u32::try_from(rounded).unwrap_or(0)
}
