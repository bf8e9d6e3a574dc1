//! One side of the order book
//!
//! Price levels keyed by price in a BTreeMap. Asks are best at the lowest
//! key, bids at the highest, so the same map serves both sides with the
//! iteration direction chosen by `side`.

use std::collections::BTreeMap;

use book_types::numeric::{Price, Quantity};
use book_types::order::{Order, Side};
use tracing::debug;

use super::price_level::PriceLevel;
use crate::error::BookError;

/// Ask or bid side of a book
#[derive(Debug, Clone, PartialEq)]
pub struct SideBook {
    side: Side,
    /// Only non-empty levels are kept
    levels: BTreeMap<Price, PriceLevel>,
}

impl SideBook {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Queue an order at `price`, creating the level if needed
    pub(crate) fn insert(&mut self, price: Price, order: Order) {
        let side = self.side;
        let level = self.levels.entry(price).or_insert_with(|| {
            debug!(side = side.as_str(), price = %price, "Price level created");
            PriceLevel::new(side, price)
        });
        level.add_order(order);
    }

    /// Level with the best price: lowest ask or highest bid
    pub fn best_level(&self) -> Option<&PriceLevel> {
        match self.side {
            Side::SELL => self.levels.values().next(),
            Side::BUY => self.levels.values().next_back(),
        }
    }

    pub(crate) fn best_level_mut(&mut self) -> Option<&mut PriceLevel> {
        match self.side {
            Side::SELL => self.levels.values_mut().next(),
            Side::BUY => self.levels.values_mut().next_back(),
        }
    }

    /// Best price and the volume resting there
    pub fn best(&self) -> Option<(Price, Quantity)> {
        self.best_level()
            .map(|level| (level.price(), level.total_volume()))
    }

    pub(crate) fn remove_level(&mut self, price: Price) -> Option<PriceLevel> {
        let removed = self.levels.remove(&price);
        if removed.is_some() {
            debug!(side = self.side.as_str(), price = %price, "Price level removed");
        }
        removed
    }

    /// Look up the level at an exact price
    pub fn level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Levels best price first
    pub fn levels(&self) -> Vec<&PriceLevel> {
        self.by_priority().collect()
    }

    fn by_priority(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::SELL => Box::new(self.levels.values()),
            Side::BUY => Box::new(self.levels.values().rev()),
        }
    }

    /// Sum of every level's volume, O(levels)
    pub fn total_volume(&self) -> Quantity {
        self.levels.values().map(PriceLevel::total_volume).sum()
    }

    /// Top `depth` levels as (price, volume), best first
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.by_priority()
            .take(depth)
            .map(|level| (level.price(), level.total_volume()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Number of resting orders across all levels
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }

    /// Check that every level is non-empty, on this side, stored under its
    /// own price and internally consistent
    pub fn verify(&self) -> Result<(), BookError> {
        for (price, level) in &self.levels {
            if level.is_empty() {
                return Err(BookError::InvariantViolation(format!(
                    "empty {} level {} left in the book",
                    self.side.as_str(),
                    price
                )));
            }
            if level.side() != self.side || level.price() != *price {
                return Err(BookError::InvariantViolation(format!(
                    "level {} {} indexed under {} {}",
                    level.side().as_str(),
                    level.price(),
                    self.side.as_str(),
                    price
                )));
            }
            level.verify()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn order(side: Side, qty: &str) -> Order {
        Order::new(side, Quantity::from_str(qty).unwrap()).unwrap()
    }

    #[test]
    fn test_ask_side_best_is_lowest() {
        let mut book = SideBook::new(Side::SELL);

        book.insert(Price::from_u64(50_000), order(Side::SELL, "1.0"));
        book.insert(Price::from_u64(51_000), order(Side::SELL, "2.0"));
        book.insert(Price::from_u64(49_000), order(Side::SELL, "1.5"));

        let (best_price, best_qty) = book.best().unwrap();
        assert_eq!(best_price, Price::from_u64(49_000));
        assert_eq!(best_qty, Quantity::from_str("1.5").unwrap());
    }

    #[test]
    fn test_bid_side_best_is_highest() {
        let mut book = SideBook::new(Side::BUY);

        book.insert(Price::from_u64(50_000), order(Side::BUY, "1.0"));
        book.insert(Price::from_u64(51_000), order(Side::BUY, "2.0"));
        book.insert(Price::from_u64(49_000), order(Side::BUY, "1.5"));

        let (best_price, best_qty) = book.best().unwrap();
        assert_eq!(best_price, Price::from_u64(51_000));
        assert_eq!(best_qty, Quantity::from_str("2.0").unwrap());
    }

    #[test]
    fn test_same_price_shares_level() {
        let mut book = SideBook::new(Side::BUY);

        book.insert(Price::from_u64(50_000), order(Side::BUY, "1.0"));
        book.insert(Price::from_u64(50_000), order(Side::BUY, "2.0"));

        assert_eq!(book.level_count(), 1);
        assert_eq!(book.order_count(), 2);
        assert_eq!(book.total_volume(), Quantity::from_str("3.0").unwrap());
    }

    #[test]
    fn test_depth_snapshot_priority_order() {
        let mut asks = SideBook::new(Side::SELL);
        let mut bids = SideBook::new(Side::BUY);

        for price in [50_000, 51_000, 49_000, 52_000] {
            asks.insert(Price::from_u64(price), order(Side::SELL, "1.0"));
            bids.insert(Price::from_u64(price), order(Side::BUY, "1.0"));
        }

        let ask_depth = asks.depth_snapshot(2);
        assert_eq!(ask_depth.len(), 2);
        assert_eq!(ask_depth[0].0, Price::from_u64(49_000));
        assert_eq!(ask_depth[1].0, Price::from_u64(50_000));

        let bid_depth = bids.depth_snapshot(2);
        assert_eq!(bid_depth[0].0, Price::from_u64(52_000));
        assert_eq!(bid_depth[1].0, Price::from_u64(51_000));
    }

    #[test]
    fn test_depth_snapshot_bounds() {
        let mut bids = SideBook::new(Side::BUY);
        assert!(bids.depth_snapshot(3).is_empty());

        for price in [100, 102, 101] {
            bids.insert(Price::from_u64(price), order(Side::BUY, "1.0"));
        }

        assert!(bids.depth_snapshot(0).is_empty());
        let prices: Vec<_> = bids.depth_snapshot(10).into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            prices,
            vec![Price::from_u64(102), Price::from_u64(101), Price::from_u64(100)]
        );
        let levels: Vec<_> = bids.levels().into_iter().map(PriceLevel::price).collect();
        assert_eq!(levels, prices);
    }

    #[test]
    fn test_remove_level() {
        let mut book = SideBook::new(Side::SELL);
        book.insert(Price::from_u64(50_000), order(Side::SELL, "1.0"));

        assert!(book.remove_level(Price::from_u64(50_000)).is_some());
        assert!(book.remove_level(Price::from_u64(50_000)).is_none());
        assert!(book.is_empty());
        assert!(book.level(Price::from_u64(50_000)).is_none());
    }

    #[test]
    fn test_verify_rejects_empty_level() {
        let mut book = SideBook::new(Side::SELL);
        book.levels.insert(
            Price::from_u64(50_000),
            PriceLevel::new(Side::SELL, Price::from_u64(50_000)),
        );

        assert!(matches!(book.verify(), Err(BookError::InvariantViolation(_))));
    }
}
