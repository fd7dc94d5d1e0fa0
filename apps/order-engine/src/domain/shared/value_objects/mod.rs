//! Shared value objects.

pub mod identifiers;
pub mod quantity;
pub mod symbol;
pub mod timestamp;

pub use identifiers::{LegId, OrderId};
pub use quantity::Quantity;
pub use symbol::Symbol;
pub use timestamp::Timestamp;
