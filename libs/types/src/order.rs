//! Order types
//!
//! An order is a single trading intent: a side, a remaining size and an
//! arrival timestamp. While it rests in the book it also carries the key of
//! the level holding it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock;
use crate::errors::OrderError;
use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }

    /// Short label for log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::BUY => "bid",
            Side::SELL => "ask",
        }
    }
}

/// Non-owning reference from a resting order to the level holding it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelKey {
    pub side: Side,
    pub price: Price,
}

/// A buy or sell intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    /// Size at submission, never changes
    pub quantity: Quantity,
    pub remaining_quantity: Quantity,
    /// Arrival time in Unix nanos, the FIFO tie-breaker within a level
    pub timestamp: i64,
    /// Level currently holding this order, `None` unless resting
    pub level: Option<LevelKey>,
}

impl Order {
    /// Create a new order stamped with the next arrival timestamp
    pub fn new(side: Side, quantity: Quantity) -> Result<Self, OrderError> {
        if quantity.is_zero() {
            return Err(OrderError::InvalidQuantity(
                "order quantity must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            order_id: OrderId::new(),
            side,
            quantity,
            remaining_quantity: quantity,
            timestamp: clock::next_timestamp(),
            level: None,
        })
    }

    /// Buy order of the given size
    pub fn bid(quantity: Quantity) -> Result<Self, OrderError> {
        Self::new(Side::BUY, quantity)
    }

    /// Sell order of the given size
    pub fn ask(quantity: Quantity) -> Result<Self, OrderError> {
        Self::new(Side::SELL, quantity)
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_quantity.is_zero()
    }

    pub fn is_resting(&self) -> bool {
        self.level.is_some()
    }

    /// Quantity executed so far
    pub fn filled_quantity(&self) -> Quantity {
        self.quantity.saturating_sub(self.remaining_quantity)
    }

    /// Reduce the remaining size by an executed amount
    ///
    /// # Panics
    /// Panics if the fill exceeds the remaining quantity
    pub fn apply_fill(&mut self, fill_quantity: Quantity) {
        assert!(
            fill_quantity <= self.remaining_quantity,
            "Fill would exceed remaining quantity"
        );
        self.remaining_quantity = self.remaining_quantity.saturating_sub(fill_quantity);
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[size: {:.2}]", self.remaining_quantity)
    }
}
