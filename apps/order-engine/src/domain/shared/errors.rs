//! Domain errors shared across bounded contexts.

use std::fmt;

/// Domain-level errors that can occur in business logic.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Invalid state transition attempted.
    InvalidStateTransition {
        /// Entity type (e.g., "OcoOrder").
        entity: String,
        /// Current state.
        from: String,
        /// Attempted state.
        to: String,
    },

    /// Aggregate invariant violated.
    InvariantViolation {
        /// Aggregate type.
        aggregate: String,
        /// Invariant that was violated.
        invariant: String,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::InvalidStateTransition { entity, from, to } => {
                write!(f, "Invalid state transition for {entity}: {from} -> {to}")
            }
            Self::InvariantViolation {
                aggregate,
                invariant,
            } => {
                write!(f, "Invariant violation in {aggregate}: {invariant}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_invalid_value_display() {
        let err = DomainError::InvalidValue {
            field: "quantity".to_string(),
            message: "must be positive".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("quantity"));
        assert!(msg.contains("positive"));
    }

    #[test]
    fn domain_error_invalid_state_transition_display() {
        let err = DomainError::InvalidStateTransition {
            entity: "OcoOrder".to_string(),
            from: "FILLED".to_string(),
            to: "ACTIVE".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("OcoOrder"));
        assert!(msg.contains("FILLED"));
    }

    #[test]
    fn domain_error_invariant_display() {
        let err = DomainError::InvariantViolation {
            aggregate: "IcebergOrder".to_string(),
            invariant: "executed = sum(filled slices)".to_string(),
        };
        assert!(format!("{err}").contains("IcebergOrder"));
    }

    #[test]
    fn domain_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(DomainError::InvalidValue {
            field: "test".to_string(),
            message: "test".to_string(),
        });
        assert!(!err.to_string().is_empty());
    }
}
