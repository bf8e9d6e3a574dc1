//! Match records
//!
//! A match is the immutable record of one execution between a resting order
//! and an incoming one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use crate::order::{Order, Side};

/// One execution between an ask and a bid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub ask_order_id: OrderId,
    pub bid_order_id: OrderId,
    /// Execution price, always the resting order's level price
    pub price: Price,
    pub quantity: Quantity,
    /// Side of the incoming order that took liquidity
    pub taker_side: Side,
}

impl Match {
    /// Record an execution of `quantity` between a resting and an incoming order
    ///
    /// Ask and bid are assigned from the resting order's side.
    pub fn new(resting: &Order, incoming: &Order, price: Price, quantity: Quantity) -> Self {
        let (ask_order_id, bid_order_id) = match resting.side {
            Side::BUY => (incoming.order_id, resting.order_id),
            Side::SELL => (resting.order_id, incoming.order_id),
        };

        Self {
            ask_order_id,
            bid_order_id,
            price,
            quantity,
            taker_side: incoming.side,
        }
    }

    /// Calculate trade value (price × quantity)
    pub fn notional(&self) -> Decimal {
        self.price.as_decimal() * self.quantity.as_decimal()
    }
}
