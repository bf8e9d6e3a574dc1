//! Order book configuration

use book_types::ids::MarketId;

/// Configuration for an order book.
#[derive(Debug, Clone)]
pub struct OrderBookConfig {
    /// Market the book trades, used to label logs and snapshots.
    pub symbol: MarketId,
    /// Re-check level volumes, emptiness and FIFO order after every
    /// mutating operation. O(orders) per call.
    pub verify_invariants: bool,
}

impl OrderBookConfig {
    pub fn new(symbol: MarketId) -> Self {
        Self {
            symbol,
            ..Self::default()
        }
    }
}

impl Default for OrderBookConfig {
    fn default() -> Self {
        Self {
            symbol: MarketId::new("BTC/USDT"),
            verify_invariants: cfg!(debug_assertions),
        }
    }
}
