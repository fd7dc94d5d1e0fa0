//! Domain services for the advanced orders context.

pub mod order_factory;

pub use order_factory::OcoLegSpec;
