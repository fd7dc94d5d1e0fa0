//! Creation and validation of composite orders.
//!
//! All creation paths go through here so validation rules live in one place.
//! The factory rejects bad requests up front; aggregates can then assume
//! their inputs are well formed.

use rust_decimal::Decimal;

use crate::domain::shared::{LegId, OrderId, Quantity, Symbol, Timestamp};

use super::super::aggregate::{
    BracketOrder, IcebergOrder, OcoLeg, OcoOrder, TrailingStopOrder,
};
use super::super::errors::OrderError;
use super::super::value_objects::{EntryKind, LegKind, OrderSide};

/// Untyped description of one OCO leg, as supplied by a creation request.
#[derive(Debug, Clone)]
pub struct OcoLegSpec {
    /// Leg kind.
    pub kind: LegKind,
    /// Trigger price for a limit leg.
    pub price: Option<Decimal>,
    /// Trigger price for a stop-style leg.
    pub stop_price: Option<Decimal>,
    /// Execution limit for a stop-limit leg.
    pub limit_price: Option<Decimal>,
}

/// Create an OCO order with both legs live.
///
/// # Errors
///
/// Returns a validation error when the quantity is not positive or a leg is
/// missing the price its kind requires.
pub fn create_oco(
    symbol: Symbol,
    side: OrderSide,
    quantity: Quantity,
    leg1: OcoLegSpec,
    leg2: OcoLegSpec,
) -> Result<OcoOrder, OrderError> {
    quantity.validate_for_order()?;
    validate_oco_leg("leg1", &leg1)?;
    validate_oco_leg("leg2", &leg2)?;

    let id = OrderId::generate();
    let leg1 = build_oco_leg(&id, "leg1", leg1);
    let leg2 = build_oco_leg(&id, "leg2", leg2);
    Ok(OcoOrder::new(
        id,
        symbol,
        side,
        quantity,
        leg1,
        leg2,
        Timestamp::now(),
    ))
}

fn validate_oco_leg(name: &str, spec: &OcoLegSpec) -> Result<(), OrderError> {
    match spec.kind {
        LegKind::Limit => {
            require_positive_price(&format!("{name}.price"), spec.price)?;
        }
        LegKind::StopMarket => {
            require_positive_price(&format!("{name}.stop_price"), spec.stop_price)?;
        }
        LegKind::StopLimit => {
            require_positive_price(&format!("{name}.stop_price"), spec.stop_price)?;
            require_positive_price(&format!("{name}.limit_price"), spec.limit_price)?;
        }
    }
    Ok(())
}

fn build_oco_leg(parent: &OrderId, suffix: &str, spec: OcoLegSpec) -> OcoLeg {
    OcoLeg::new(
        LegId::derived(parent, suffix),
        spec.kind,
        spec.price,
        spec.stop_price,
        spec.limit_price,
    )
}

/// Create a bracket order with a live entry and pending exits.
///
/// The risk/reward ratio is computed from the entry price when one is given
/// (zero otherwise, and zero when the stop sits on the entry). Exit
/// placement relative to the entry is not constrained here; the evaluators
/// apply whichever exit crosses first.
///
/// # Errors
///
/// Returns a validation error when the quantity is not positive or a limit
/// entry has no price.
pub fn create_bracket(
    symbol: Symbol,
    side: OrderSide,
    quantity: Quantity,
    entry_kind: EntryKind,
    entry_price: Option<Decimal>,
    stop_loss_price: Decimal,
    take_profit_price: Decimal,
) -> Result<BracketOrder, OrderError> {
    quantity.validate_for_order()?;
    if entry_kind == EntryKind::Limit {
        require_positive_price("entry_price", entry_price)?;
    }
    require_positive_price("stop_loss_price", Some(stop_loss_price))?;
    require_positive_price("take_profit_price", Some(take_profit_price))?;

    let risk_reward_ratio = entry_price.map_or(Decimal::ZERO, |entry| {
        let risk = (entry - stop_loss_price).abs();
        let reward = (take_profit_price - entry).abs();
        if risk.is_zero() {
            Decimal::ZERO
        } else {
            reward / risk
        }
    });

    Ok(BracketOrder::new(
        OrderId::generate(),
        symbol,
        side,
        quantity,
        entry_kind,
        entry_price,
        stop_loss_price,
        take_profit_price,
        risk_reward_ratio,
        Timestamp::now(),
    ))
}

/// Create a trailing stop order seeded from the current reference price.
///
/// # Errors
///
/// Returns a validation error when the quantity is not positive, no trail
/// parameter is given, or a trail parameter is out of range.
pub fn create_trailing_stop(
    symbol: Symbol,
    side: OrderSide,
    quantity: Quantity,
    trail_amount: Option<Decimal>,
    trail_percent: Option<Decimal>,
    activation_price: Option<Decimal>,
    reference_price: Decimal,
) -> Result<TrailingStopOrder, OrderError> {
    quantity.validate_for_order()?;
    if let Some(amt) = trail_amount {
        if amt <= Decimal::ZERO {
            return Err(OrderError::validation(
                "trail_amount",
                "must be positive",
            ));
        }
    }
    if let Some(pct) = trail_percent {
        if pct <= Decimal::ZERO || pct >= Decimal::ONE_HUNDRED {
            return Err(OrderError::validation(
                "trail_percent",
                "must be between 0 and 100 exclusive",
            ));
        }
    }
    if let Some(act) = activation_price {
        require_positive_price("activation_price", Some(act))?;
    }
    require_positive_price("reference_price", Some(reference_price))?;

    Ok(TrailingStopOrder::new(
        OrderId::generate(),
        symbol,
        side,
        quantity,
        trail_amount,
        trail_percent,
        activation_price,
        reference_price,
        Timestamp::now(),
    )?)
}

/// Create an iceberg order, pre-splitting the total into slices.
///
/// # Errors
///
/// Returns a validation error when either quantity is not positive or the
/// display quantity exceeds the total.
pub fn create_iceberg(
    symbol: Symbol,
    side: OrderSide,
    total_quantity: Quantity,
    display_quantity: Quantity,
    randomize_slices: bool,
    time_interval_ms: u64,
) -> Result<IcebergOrder, OrderError> {
    total_quantity.validate_for_order()?;
    if !display_quantity.is_positive() {
        return Err(OrderError::validation(
            "display_quantity",
            "must be positive",
        ));
    }
    if display_quantity > total_quantity {
        return Err(OrderError::validation(
            "display_quantity",
            "must not exceed total_quantity",
        ));
    }

    Ok(IcebergOrder::new(
        OrderId::generate(),
        symbol,
        side,
        total_quantity,
        display_quantity,
        randomize_slices,
        time_interval_ms,
        Timestamp::now(),
    ))
}

fn require_positive_price(field: &str, price: Option<Decimal>) -> Result<(), OrderError> {
    match price {
        Some(p) if p > Decimal::ZERO => Ok(()),
        Some(_) => Err(OrderError::validation(field, "must be positive")),
        None => Err(OrderError::validation(field, "is required")),
    }
}
