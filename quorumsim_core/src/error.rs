//! Error types for the QuorumSim core.

use thiserror::Error;

/// Errors raised by the simulation core.
///
/// Every failure is detected synchronously by the component receiving the
/// bad input and propagated unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Non-positive, non-finite or out-of-range input
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Human-readable explanation
        reason: String,
    },
}

impl SimError {
    /// Creates an invalid parameter error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the name of the parameter that was rejected.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, SimError>;

/// Rejects zero counts.
pub(crate) fn ensure_positive_count(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(SimError::invalid(name, "must be greater than zero"));
    }
    Ok(())
}

/// Rejects means that are not finite and strictly positive.
pub(crate) fn ensure_positive_mean(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(SimError::invalid(name, format!("must be finite, got {}", value)));
    }
    if value <= 0.0 {
        return Err(SimError::invalid(
            name,
            format!("must be greater than zero, got {}", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_parameter() {
        let err = SimError::invalid("mtbf", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `mtbf`: must be greater than zero"
        );
        assert_eq!(err.parameter(), "mtbf");
    }

    #[test]
    fn test_mean_validation() {
        assert!(ensure_positive_mean("mttr", 0.5).is_ok());
        assert!(ensure_positive_mean("mttr", 0.0).is_err());
        assert!(ensure_positive_mean("mttr", -1.0).is_err());
        assert!(ensure_positive_mean("mttr", f64::NAN).is_err());
        assert!(ensure_positive_mean("mttr", f64::INFINITY).is_err());
    }

    #[test]
    fn test_count_validation() {
        assert!(ensure_positive_count("horizon", 1).is_ok());
        assert_eq!(
            ensure_positive_count("horizon", 0).unwrap_err().parameter(),
            "horizon"
        );
    }
}
