//! Order book for a single market
//!
//! Routes limit orders to the price level they rest at and sweeps market
//! orders through the opposing side best price first.

use std::collections::HashMap;

use book_types::errors::OrderError;
use book_types::ids::{MarketId, OrderId};
use book_types::numeric::{Price, Quantity};
use book_types::order::{LevelKey, Order, Side};
use book_types::trade::Match;
use rust_decimal::Decimal;
use tracing::{debug, error, info};

use super::price_level::PriceLevel;
use super::side_book::SideBook;
use crate::config::OrderBookConfig;
use crate::error::BookError;
use crate::snapshot::{BookSnapshot, LevelSnapshot};

/// Two-sided limit order book
///
/// Every operation runs to completion on the caller's thread. Mutation
/// needs `&mut self`, so sharing a book across threads requires the caller
/// to serialize access.
#[derive(Debug, Clone)]
pub struct OrderBook {
    config: OrderBookConfig,
    asks: SideBook,
    bids: SideBook,
    /// Level of every resting order, by id
    index: HashMap<OrderId, LevelKey>,
}

impl OrderBook {
    /// Create an empty book
    pub fn new(config: OrderBookConfig) -> Self {
        info!(
            symbol = config.symbol.as_str(),
            verify_invariants = config.verify_invariants,
            "OrderBook initialized"
        );

        Self {
            config,
            asks: SideBook::new(Side::SELL),
            bids: SideBook::new(Side::BUY),
            index: HashMap::new(),
        }
    }

    /// Create an empty book with default configuration
    pub fn with_defaults() -> Self {
        Self::new(OrderBookConfig::default())
    }

    pub fn symbol(&self) -> &MarketId {
        &self.config.symbol
    }

    /// Rest an order at `price` on its own side
    ///
    /// Never matches, even if `price` crosses the opposite side. An order
    /// whose id is already resting in this book is rejected.
    pub fn place_limit_order(&mut self, price: Price, order: Order) -> Result<OrderId, BookError> {
        if order.is_resting() || self.index.contains_key(&order.order_id) {
            return Err(OrderError::AlreadyResting {
                order_id: order.order_id,
            }
            .into());
        }
        if order.is_filled() {
            return Err(OrderError::AlreadyFilled {
                order_id: order.order_id,
            }
            .into());
        }

        let order_id = order.order_id;
        debug!(
            symbol = self.config.symbol.as_str(),
            order_id = %order_id,
            side = order.side.as_str(),
            price = %price,
            quantity = %order.remaining_quantity,
            "Limit order placed"
        );

        self.index.insert(order_id, LevelKey { side: order.side, price });
        self.side_mut(order.side).insert(price, order);
        self.verify_after("place_limit_order");

        Ok(order_id)
    }

    /// Match an order immediately against the opposite side
    ///
    /// A bid consumes asks from the lowest price up, an ask consumes bids
    /// from the highest price down. The order's remaining quantity is reduced
    /// in place. If the opposing side holds less than the order's remaining
    /// quantity nothing is touched and `InsufficientLiquidity` is returned.
    /// An order that is already filled produces no matches.
    pub fn place_market_order(&mut self, order: &mut Order) -> Result<Vec<Match>, BookError> {
        if order.is_resting() || self.index.contains_key(&order.order_id) {
            return Err(OrderError::AlreadyResting {
                order_id: order.order_id,
            }
            .into());
        }
        if order.is_filled() {
            return Ok(Vec::new());
        }

        let opposing_side = order.side.opposite();
        let (opposing, index) = self.side_and_index_mut(opposing_side);

        let available = opposing.total_volume();
        if order.remaining_quantity > available {
            info!(
                order_id = %order.order_id,
                side = order.side.as_str(),
                requested = %order.remaining_quantity,
                available = %available,
                "Market order rejected: insufficient liquidity"
            );
            return Err(BookError::InsufficientLiquidity {
                side: opposing_side,
                requested: order.remaining_quantity,
                available,
            });
        }

        let mut matches = Vec::new();
        while !order.is_filled() {
            let Some(level) = opposing.best_level_mut() else {
                break;
            };

            let price = level.price();
            let (executed, filled) = level.fill_and_drain(order);
            matches.extend(executed);
            for order_id in &filled {
                index.remove(order_id);
            }

            if level.is_empty() {
                opposing.remove_level(price);
            }
        }

        debug!(
            symbol = self.config.symbol.as_str(),
            order_id = %order.order_id,
            side = order.side.as_str(),
            matches = matches.len(),
            remaining = %order.remaining_quantity,
            "Market order executed"
        );
        self.verify_after("place_market_order");

        Ok(matches)
    }

    /// Total resting ask volume, O(levels)
    pub fn ask_total_volume(&self) -> Quantity {
        self.asks.total_volume()
    }

    /// Total resting bid volume, O(levels)
    pub fn bid_total_volume(&self) -> Quantity {
        self.bids.total_volume()
    }

    /// Ask levels, lowest price first
    pub fn asks(&self) -> Vec<&PriceLevel> {
        self.asks.levels()
    }

    /// Bid levels, highest price first
    pub fn bids(&self) -> Vec<&PriceLevel> {
        self.bids.levels()
    }

    pub fn ask_level(&self, price: Price) -> Option<&PriceLevel> {
        self.asks.level(price)
    }

    pub fn bid_level(&self, price: Price) -> Option<&PriceLevel> {
        self.bids.level(price)
    }

    /// Look up a resting order by id on either side
    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        let key = self.index.get(order_id)?;
        self.side(key.side).level(key.price)?.order(order_id)
    }

    /// Lowest ask price and its volume
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.best()
    }

    /// Highest bid price and its volume
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.best()
    }

    /// Best ask minus best bid, when both sides have orders
    pub fn spread(&self) -> Option<Decimal> {
        let (ask, _) = self.best_ask()?;
        let (bid, _) = self.best_bid()?;
        Some(ask.as_decimal() - bid.as_decimal())
    }

    /// Top `depth` levels of one side as (price, volume), best first
    pub fn depth_snapshot(&self, side: Side, depth: usize) -> Vec<(Price, Quantity)> {
        self.side(side).depth_snapshot(depth)
    }

    pub fn level_count(&self, side: Side) -> usize {
        self.side(side).level_count()
    }

    /// Resting orders on both sides
    pub fn order_count(&self) -> usize {
        self.asks.order_count() + self.bids.order_count()
    }

    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }

    /// Audit both sides: level volumes, arrival order, back-references, the
    /// absence of empty levels and the agreement of the order index
    pub fn check_invariants(&self) -> Result<(), BookError> {
        self.asks.verify()?;
        self.bids.verify()?;

        let resting = self.order_count();
        if self.index.len() != resting {
            return Err(BookError::InvariantViolation(format!(
                "order index holds {} ids for {} resting orders",
                self.index.len(),
                resting
            )));
        }
        for (order_id, key) in &self.index {
            if self.order(order_id).is_none() {
                return Err(BookError::InvariantViolation(format!(
                    "indexed order {} not found at {} level {}",
                    order_id,
                    key.side.as_str(),
                    key.price
                )));
            }
        }

        Ok(())
    }

    /// Capture the full book state
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            symbol: self.config.symbol.clone(),
            asks: self.asks.levels().into_iter().map(LevelSnapshot::from).collect(),
            bids: self.bids.levels().into_iter().map(LevelSnapshot::from).collect(),
        }
    }

    /// Rebuild a book from a snapshot
    ///
    /// Rejects snapshots for another market, with empty or duplicate levels,
    /// with an order id listed more than once, with filled orders or orders on
    /// the wrong side, and with level volumes that disagree with their orders.
    pub fn from_snapshot(config: OrderBookConfig, snapshot: &BookSnapshot) -> Result<Self, BookError> {
        if snapshot.symbol != config.symbol {
            return Err(BookError::InvalidSnapshot(format!(
                "snapshot is for {}, book is for {}",
                snapshot.symbol, config.symbol
            )));
        }

        let mut book = Self::new(config);
        for (side, levels) in [(Side::SELL, &snapshot.asks), (Side::BUY, &snapshot.bids)] {
            for level in levels {
                book.restore_level(side, level)?;
            }
        }
        book.check_invariants()
            .map_err(|e| BookError::InvalidSnapshot(e.to_string()))?;

        info!(
            symbol = book.config.symbol.as_str(),
            ask_levels = book.asks.level_count(),
            bid_levels = book.bids.level_count(),
            orders = book.order_count(),
            "OrderBook restored from snapshot"
        );
        Ok(book)
    }

    fn restore_level(&mut self, side: Side, snapshot: &LevelSnapshot) -> Result<(), BookError> {
        let price = snapshot.price;
        let (book, index) = self.side_and_index_mut(side);

        if snapshot.orders.is_empty() {
            return Err(BookError::InvalidSnapshot(format!(
                "empty {} level at {}",
                side.as_str(),
                price
            )));
        }
        if book.level(price).is_some() {
            return Err(BookError::InvalidSnapshot(format!(
                "duplicate {} level at {}",
                side.as_str(),
                price
            )));
        }

        for order in &snapshot.orders {
            if order.side != side {
                return Err(BookError::InvalidSnapshot(format!(
                    "order {} listed on the {} side",
                    order.order_id,
                    side.as_str()
                )));
            }
            if order.is_filled() {
                return Err(BookError::InvalidSnapshot(format!(
                    "filled order {} at {}",
                    order.order_id, price
                )));
            }
            if index.contains_key(&order.order_id) {
                return Err(BookError::InvalidSnapshot(format!(
                    "order {} listed more than once",
                    order.order_id
                )));
            }

            let mut order = order.clone();
            order.level = None;
            index.insert(order.order_id, LevelKey { side, price });
            book.insert(price, order);
        }

        let restored = book.level(price).map(PriceLevel::total_volume);
        if restored != Some(snapshot.total_volume) {
            return Err(BookError::InvalidSnapshot(format!(
                "{} level {} records volume {} but its orders sum to {}",
                side.as_str(),
                price,
                snapshot.total_volume,
                restored.unwrap_or_default()
            )));
        }

        Ok(())
    }

    fn side(&self, side: Side) -> &SideBook {
        match side {
            Side::SELL => &self.asks,
            Side::BUY => &self.bids,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideBook {
        match side {
            Side::SELL => &mut self.asks,
            Side::BUY => &mut self.bids,
        }
    }

    fn side_and_index_mut(&mut self, side: Side) -> (&mut SideBook, &mut HashMap<OrderId, LevelKey>) {
        match side {
            Side::SELL => (&mut self.asks, &mut self.index),
            Side::BUY => (&mut self.bids, &mut self.index),
        }
    }

    fn verify_after(&self, operation: &'static str) {
        if !self.config.verify_invariants {
            return;
        }
        if let Err(e) = self.check_invariants() {
            error!(
                symbol = self.config.symbol.as_str(),
                operation,
                error = %e,
                "Order book invariant violated"
            );
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::with_defaults()
    }
}
