//! Price level implementation with FIFO queue
//!
//! A price level holds every resting order at one price on one side. Orders
//! are kept oldest-arrival-first, which is the time half of price-time
//! priority, and the level tracks the sum of their remaining quantities.

use std::collections::VecDeque;

use book_types::ids::OrderId;
use book_types::numeric::{Price, Quantity};
use book_types::order::{LevelKey, Order, Side};
use book_types::trade::Match;
use tracing::trace;

use crate::error::BookError;

/// Resting orders at a single price
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLevel {
    price: Price,
    side: Side,
    /// Oldest arrival at the front
    orders: VecDeque<Order>,
    /// Sum of `remaining_quantity` over `orders`
    total_volume: Quantity,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(side: Side, price: Price) -> Self {
        Self {
            price,
            side,
            orders: VecDeque::new(),
            total_volume: Quantity::zero(),
        }
    }

    /// Queue an order behind every order that arrived before it
    ///
    /// New orders carry the latest timestamp, so in practice this is a push
    /// to the back of the queue.
    pub fn add_order(&mut self, mut order: Order) {
        order.level = Some(self.key());
        self.total_volume += order.remaining_quantity;

        let index = self
            .orders
            .partition_point(|queued| queued.timestamp <= order.timestamp);
        self.orders.insert(index, order);
    }

    /// Remove an order by id, returning it with its level reference cleared
    ///
    /// Returns None if the order is not queued here.
    pub fn remove_order(&mut self, order_id: &OrderId) -> Option<Order> {
        let position = self.orders.iter().position(|order| &order.order_id == order_id)?;
        let mut order = self.orders.remove(position)?;

        order.level = None;
        self.total_volume = self.total_volume.saturating_sub(order.remaining_quantity);

        debug_assert!(self.is_time_ordered(), "queue out of arrival order after removal");
        Some(order)
    }

    /// Match an incoming order against the queue in arrival order
    ///
    /// Each resting order trades `min(resting, incoming)` at this level's
    /// price until the incoming order is filled or the queue is exhausted.
    /// Resting orders that were filled are removed once the walk is over.
    /// An incoming order on this level's own side matches nothing.
    pub fn fill(&mut self, incoming: &mut Order) -> Vec<Match> {
        self.fill_and_drain(incoming).0
    }

    /// `fill`, also returning the ids of the resting orders it removed
    pub(crate) fn fill_and_drain(&mut self, incoming: &mut Order) -> (Vec<Match>, Vec<OrderId>) {
        let mut matches = Vec::new();
        let mut filled = Vec::new();

        if incoming.side == self.side {
            return (matches, filled);
        }

        for resting in self.orders.iter_mut() {
            if incoming.is_filled() {
                break;
            }

            let quantity = resting.remaining_quantity.min(incoming.remaining_quantity);
            resting.apply_fill(quantity);
            incoming.apply_fill(quantity);
            self.total_volume = self.total_volume.saturating_sub(quantity);

            let executed = Match::new(resting, incoming, self.price, quantity);
            trace!(
                price = %executed.price,
                quantity = %executed.quantity,
                ask_order_id = %executed.ask_order_id,
                bid_order_id = %executed.bid_order_id,
                "Match executed"
            );
            matches.push(executed);

            if resting.is_filled() {
                filled.push(resting.order_id);
            }
        }

        for order_id in &filled {
            self.remove_order(order_id);
        }

        (matches, filled)
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Key stored in the back-reference of every order queued here
    pub fn key(&self) -> LevelKey {
        LevelKey {
            side: self.side,
            price: self.price,
        }
    }

    /// Get the total remaining quantity at this price level
    pub fn total_volume(&self) -> Quantity {
        self.total_volume
    }

    /// Resting orders, oldest first
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Look up a queued order by id
    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.order_id == order_id)
    }

    /// Order at the head of the queue
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn is_time_ordered(&self) -> bool {
        self.orders
            .iter()
            .zip(self.orders.iter().skip(1))
            .all(|(earlier, later)| earlier.timestamp <= later.timestamp)
    }

    /// Check the level's internal invariants
    ///
    /// Aggregate volume equals the sum of queued remaining quantities, the
    /// queue is in arrival order, and every queued order is unfilled, on this
    /// side and points back at this level.
    pub fn verify(&self) -> Result<(), BookError> {
        let sum: Quantity = self.orders.iter().map(|order| order.remaining_quantity).sum();
        if sum != self.total_volume {
            return Err(BookError::InvariantViolation(format!(
                "level {} volume {} does not match queued total {}",
                self.price, self.total_volume, sum
            )));
        }

        if !self.is_time_ordered() {
            return Err(BookError::InvariantViolation(format!(
                "level {} queue is out of arrival order",
                self.price
            )));
        }

        let key = self.key();
        for order in &self.orders {
            if order.is_filled() {
                return Err(BookError::InvariantViolation(format!(
                    "filled order {} still resting at {}",
                    order.order_id, self.price
                )));
            }
            if order.side != self.side || order.level != Some(key) {
                return Err(BookError::InvariantViolation(format!(
                    "order {} does not belong to {} level {}",
                    order.order_id,
                    self.side.as_str(),
                    self.price
                )));
            }
        }

        Ok(())
    }
}
