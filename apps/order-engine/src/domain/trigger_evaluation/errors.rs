//! Errors raised while evaluating orders against price updates.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::shared::OrderId;

/// Error raised by an evaluator.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The incoming price is unusable (zero or negative).
    #[error("invalid price {price}: must be positive")]
    InvalidPrice {
        /// The rejected price.
        price: Decimal,
    },

    /// An order reached evaluation in a state the factory should have
    /// prevented.
    #[error("order {order_id} is inconsistent: {message}")]
    InconsistentOrder {
        /// Order being evaluated.
        order_id: OrderId,
        /// What was wrong.
        message: String,
    },
}
