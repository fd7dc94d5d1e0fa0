//! Value-level helpers for trigger evaluation.

pub mod predicates;
