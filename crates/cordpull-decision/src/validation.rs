//! Boundary checks for parameter snapshots.
//!
//! The engine accepts anything and stays panic-free, but out-of-domain inputs
//! produce meaningless scores. Hosts call [`validate_parameters`] to reject
//! them or [`clamp_parameters`] to coerce them before evaluation.

use cordpull_types::SimulationParameters;

use crate::error::ParameterError;

/// Check every field against its documented domain.
///
/// # Errors
///
/// Returns the first violation found, in declaration order.
pub fn validate_parameters(params: &SimulationParameters) -> Result<(), ParameterError> {
    let unit_fields = [
        ("peer_pressure", params.peer_pressure),
        ("discount_factor", params.discount_factor),
        ("p_accident_base", params.p_accident_base),
        ("social_capital", params.social_capital),
    ];

    for (field, value) in unit_fields {
        if !value.is_finite() {
            return Err(ParameterError::NonFinite { field, value });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ParameterError::OutOfRange {
                field,
                value,
                min: 0.0,
                max: 1.0,
            });
        }
    }

    let lambda = params.loss_aversion_coefficient;
    if !lambda.is_finite() {
        return Err(ParameterError::NonFinite {
            field: "loss_aversion_coefficient",
            value: lambda,
        });
    }
    if lambda < 0.0 {
        return Err(ParameterError::NegativeLossAversion { value: lambda });
    }

    Ok(())
}

/// Coerce a snapshot into its documented domain.
///
/// Unit-interval fields are clamped to `[0, 1]`, a negative loss-aversion
/// coefficient becomes 0, and non-finite reals fall back to the defaults.
pub fn clamp_parameters(params: &SimulationParameters) -> SimulationParameters {
    let defaults = SimulationParameters::default();
    let unit = |value: f64, fallback: f64| {
        if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            fallback
        }
    };

    let lambda = if params.loss_aversion_coefficient.is_finite() {
        params.loss_aversion_coefficient.max(0.0)
    } else {
        defaults.loss_aversion_coefficient
    };

    SimulationParameters {
        peer_pressure: unit(params.peer_pressure, defaults.peer_pressure),
        discount_factor: unit(params.discount_factor, defaults.discount_factor),
        p_accident_base: unit(params.p_accident_base, defaults.p_accident_base),
        social_capital: unit(params.social_capital, defaults.social_capital),
        loss_aversion_coefficient: lambda,
        ..*params
    }
}
