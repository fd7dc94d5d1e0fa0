//! Data transfer objects crossing the application boundary.

pub mod order_dto;

pub use order_dto::{
    CancelResponse, CreateBracketRequest, CreateIcebergRequest, CreateOcoRequest,
    CreateTrailingStopRequest, OcoLegRequest, OrdersSnapshot,
};
