//! Value objects for the advanced orders context.

pub mod leg_kind;
pub mod order_side;
pub mod order_status;

pub use leg_kind::{EntryKind, ExitKind, FilledLeg, LegKind};
pub use order_side::OrderSide;
pub use order_status::OrderStatus;
