//! Matching Engine
//!
//! In-memory limit order book with price-time priority matching.
//!
//! Limit orders rest at their price level without crossing. Market orders
//! sweep the opposite side best price first and, within a level, oldest
//! order first. A market order larger than the opposite side's total volume
//! is rejected without touching the book.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Every level's volume equals the sum of its orders' remaining quantities
//! - Empty levels never stay in the book
//! - Conservation of quantity

pub mod book;
pub mod config;
pub mod error;
pub mod snapshot;

pub use book::{OrderBook, PriceLevel, SideBook};
pub use config::OrderBookConfig;
pub use error::BookError;
pub use snapshot::{BookSnapshot, LevelSnapshot};
