//! Error taxonomy shared by every fallible operation in the crate

use thiserror::Error;

/// Usage errors raised synchronously by the call that detects them.
///
/// The engine does no I/O, so there is no transient failure class: every
/// variant is a programming error surfaced straight to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmitterError {
    /// The supplied value has the wrong shape (e.g. a string where a
    /// number was expected, a 3-element list where a range was expected)
    #[error("type mismatch: expected {expected}")]
    TypeMismatch { expected: &'static str },
    /// The value has the right shape but breaks a precondition
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl EmitterError {
    pub(crate) const fn type_mismatch(expected: &'static str) -> Self {
        Self::TypeMismatch { expected }
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

pub type Result<T, E = EmitterError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            EmitterError::InvalidArgument("delta must be >= 0").to_string(),
            "invalid argument: delta must be >= 0"
        );
        assert_eq!(
            EmitterError::type_mismatch("number").to_string(),
            "type mismatch: expected number"
        );
    }

    #[test]
    fn test_kind_predicates() {
        assert!(EmitterError::type_mismatch("range").is_type_mismatch());
        assert!(!EmitterError::type_mismatch("range").is_invalid_argument());
        assert!(EmitterError::InvalidArgument("x").is_invalid_argument());
    }
}
