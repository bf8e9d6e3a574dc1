//! Serializable book state
//!
//! The shape a persistence layer stores and restores. Levels are listed in
//! priority order and each carries its full order queue, so two snapshots
//! compare equal exactly when the books hold the same state.

use book_types::ids::MarketId;
use book_types::numeric::{Price, Quantity};
use book_types::order::Order;
use serde::{Deserialize, Serialize};

use crate::book::PriceLevel;

/// Full state of one price level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub price: Price,
    pub total_volume: Quantity,
    /// Oldest arrival first
    pub orders: Vec<Order>,
}

impl From<&PriceLevel> for LevelSnapshot {
    fn from(level: &PriceLevel) -> Self {
        Self {
            price: level.price(),
            total_volume: level.total_volume(),
            orders: level.orders().cloned().collect(),
        }
    }
}

/// Full state of an order book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub symbol: MarketId,
    /// Lowest price first
    pub asks: Vec<LevelSnapshot>,
    /// Highest price first
    pub bids: Vec<LevelSnapshot>,
}
