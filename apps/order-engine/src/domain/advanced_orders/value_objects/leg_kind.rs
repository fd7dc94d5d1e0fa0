//! Leg kinds and leg selectors for composite orders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an OCO leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegKind {
    /// Limit order leg (fires on a favorable price).
    Limit,
    /// Stop-market leg (fires on an adverse crossing).
    StopMarket,
    /// Stop-limit leg (trigger behavior matches stop-market here).
    StopLimit,
}

impl LegKind {
    /// Returns true for the stop-style kinds.
    #[must_use]
    pub const fn is_stop(&self) -> bool {
        matches!(self, Self::StopMarket | Self::StopLimit)
    }
}

impl fmt::Display for LegKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limit => write!(f, "LIMIT"),
            Self::StopMarket => write!(f, "STOP_MARKET"),
            Self::StopLimit => write!(f, "STOP_LIMIT"),
        }
    }
}

/// Kind of a bracket entry leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    /// Market entry: fires on the first observed price update.
    Market,
    /// Limit entry: fires on a favorable price.
    Limit,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
        }
    }
}

/// Which bracket exit leg fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitKind {
    /// The protective stop-loss leg.
    StopLoss,
    /// The take-profit leg.
    TakeProfit,
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StopLoss => write!(f, "stop_loss"),
            Self::TakeProfit => write!(f, "take_profit"),
        }
    }
}

/// Which OCO leg filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilledLeg {
    /// The first leg.
    Leg1,
    /// The second leg.
    Leg2,
}

impl FilledLeg {
    /// One-based leg number, as exposed to clients.
    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Self::Leg1 => 1,
            Self::Leg2 => 2,
        }
    }
}

impl fmt::Display for FilledLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
