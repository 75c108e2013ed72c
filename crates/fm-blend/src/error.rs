//! Blending errors.

use thiserror::Error;

/// Result type for blending operations.
pub type BlendResult<T> = Result<T, BlendError>;

/// Errors for malformed blending input.
///
/// Infeasible scenarios are *not* errors: they come back as
/// `Verdict::Invalid` on the report. Errors are reserved for input the
/// solver refuses to run on at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlendError {
    /// Non-finite numeric input (NaN/inf).
    #[error("Non-finite value for {what}")]
    NonFinite { what: &'static str },

    /// Negative value where only non-negative makes sense.
    #[error("Negative value for {what}")]
    Negative { what: &'static str },

    /// Percentage outside 0-100. Rejected, never clamped.
    #[error("Percentage out of range (0-100): {value}")]
    PercentOutOfRange { value: f64 },

    /// Ethanol fraction outside 0-1.
    #[error("Ethanol fraction out of range (0-1): {value}")]
    FractionOutOfRange { value: f64 },

    /// Grade id not found in the catalog.
    #[error("Unknown fuel grade: {id}")]
    UnknownGrade { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BlendError::PercentOutOfRange { value: 120.0 };
        assert!(err.to_string().contains("120"));

        let err = BlendError::UnknownGrade { id: "e95".into() };
        assert!(err.to_string().contains("e95"));
    }
}
