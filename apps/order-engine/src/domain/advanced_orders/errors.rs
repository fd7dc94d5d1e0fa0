//! Errors for order creation, lookup and evaluation.

use thiserror::Error;

use crate::domain::shared::{DomainError, OrderId};

/// Error raised by order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A creation request failed validation.
    #[error("validation failed for '{field}': {message}")]
    Validation {
        /// Offending request field.
        field: String,
        /// Human-readable explanation.
        message: String,
    },

    /// The referenced order does not exist.
    #[error("order not found: {order_id}")]
    NotFound {
        /// The id that was looked up.
        order_id: OrderId,
    },

    /// Evaluating an order against a price update failed.
    #[error("evaluation failed for order {order_id}: {message}")]
    Evaluation {
        /// Order being evaluated.
        order_id: OrderId,
        /// Human-readable explanation.
        message: String,
    },
}

impl OrderError {
    /// Stable machine-readable reason code for clients and logs.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Evaluation { .. } => "EVALUATION_ERROR",
        }
    }

    /// Shorthand for a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidValue { field, message } => Self::Validation { field, message },
            DomainError::InvalidStateTransition { entity, from, to } => Self::Validation {
                field: entity,
                message: format!("invalid state transition from {from} to {to}"),
            },
            DomainError::InvariantViolation {
                aggregate,
                invariant,
            } => Self::Validation {
                field: aggregate,
                message: invariant,
            },
        }
    }
}
