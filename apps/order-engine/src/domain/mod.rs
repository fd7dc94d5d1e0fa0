//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure
//! dependencies. This layer defines:
//!
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Events**: Records of state transitions
//! - **Domain Services**: Stateless business logic
//!
//! # Bounded Contexts
//!
//! - [`advanced_orders`]: Composite order lifecycle (OCO, Bracket, Trailing
//!   Stop, Iceberg), the order factory, and the in-memory registry
//! - [`trigger_evaluation`]: Price-driven trigger predicates and the
//!   per-order-type evaluators

pub mod advanced_orders;
pub mod shared;
pub mod trigger_evaluation;
