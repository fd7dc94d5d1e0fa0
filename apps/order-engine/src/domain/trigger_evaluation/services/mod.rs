//! Per-order-type evaluators.
//!
//! Each evaluator takes one aggregate, one price update and the current
//! time, applies the trigger predicates, performs the resulting state
//! transition on the aggregate and returns the domain events it produced.

pub mod bracket_evaluator;
pub mod iceberg_evaluator;
pub mod oco_evaluator;
pub mod trailing_stop_evaluator;
