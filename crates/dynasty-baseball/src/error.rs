// Error taxonomy shared by the calculators.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    /// An input that no calculation can make sense of: a negative or
    /// non-finite float, or a threshold that would be used as a divisor
    /// while zero.
    #[error("invalid input for `{field}`: {message}")]
    InvalidInput { field: String, message: String },
}

impl MetricsError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        MetricsError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Reject negative, NaN and infinite values.
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<f64, MetricsError> {
    if !value.is_finite() || value < 0.0 {
        return Err(MetricsError::invalid(
            field,
            format!("must be a finite number >= 0, got {value}"),
        ));
    }
    Ok(value)
}

/// Reject values that cannot be used as a divisor.
pub(crate) fn ensure_positive(field: &str, value: f64) -> Result<f64, MetricsError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MetricsError::invalid(
            field,
            format!("must be a finite number > 0, got {value}"),
        ));
    }
    Ok(value)
}

/// `min(100, round(current / target * 100))`, the progress convention used
/// by every threshold tracker. `target` must already be known positive.
pub(crate) fn capped_pct(current: f64, target: f64) -> u32 {
    ((current / target) * 100.0).round().clamp(0.0, 100.0) as u32
}
