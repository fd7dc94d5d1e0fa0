//! Composite order aggregates.

pub mod bracket;
pub mod iceberg;
pub mod oco;
pub mod trailing_stop;

pub use bracket::{BracketOrder, EntryLeg, StopLossLeg, TakeProfitLeg};
pub use iceberg::{IcebergOrder, IcebergSlice};
pub use oco::{OcoLeg, OcoOrder};
pub use trailing_stop::TrailingStopOrder;

use serde::{Deserialize, Serialize};

use crate::domain::shared::{OrderId, Symbol};

use super::value_objects::OrderStatus;

/// Closed sum type over the four composite order kinds.
///
/// The dispatcher pattern-matches on this to select the evaluator, giving
/// exhaustiveness checking instead of runtime type-string comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvancedOrder {
    /// One-cancels-other order.
    Oco(OcoOrder),
    /// Bracket order.
    Bracket(BracketOrder),
    /// Trailing stop order.
    TrailingStop(TrailingStopOrder),
    /// Iceberg order.
    Iceberg(IcebergOrder),
}

impl AdvancedOrder {
    /// Get the order id.
    #[must_use]
    pub fn id(&self) -> &OrderId {
        match self {
            Self::Oco(o) => o.id(),
            Self::Bracket(o) => o.id(),
            Self::TrailingStop(o) => o.id(),
            Self::Iceberg(o) => o.id(),
        }
    }

    /// Get the order symbol.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::Oco(o) => o.symbol(),
            Self::Bracket(o) => o.symbol(),
            Self::TrailingStop(o) => o.symbol(),
            Self::Iceberg(o) => o.symbol(),
        }
    }

    /// Get the parent order status.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        match self {
            Self::Oco(o) => o.status(),
            Self::Bracket(o) => o.status(),
            Self::TrailingStop(o) => o.status(),
            Self::Iceberg(o) => o.status(),
        }
    }
}
