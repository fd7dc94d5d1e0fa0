//! Trigger Evaluation Bounded Context
//!
//! Pure decision logic for driving composite orders from price updates.
//! Predicates answer "does this price cross that level", evaluators apply
//! them to one aggregate and return the domain events that resulted.

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::EvaluationError;
pub use value_objects::predicates;
