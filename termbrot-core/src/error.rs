use thiserror::Error;

/// Errors originating from the core fractal engine.
///
/// Every variant is recoverable: the operation that produced it left the
/// state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("invalid iteration limits: [{min}, {max}] (need 1 <= min <= max)")]
    InvalidIterationLimits { min: u32, max: u32 },
}

impl CoreError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
