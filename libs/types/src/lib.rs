//! Types library for the limit order book
//!
//! This library provides the value types shared by the matching engine and
//! anything that feeds it or consumes its output.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, MarketId)
//! - `numeric`: Fixed-point decimal types (Price, Quantity)
//! - `clock`: Strictly increasing arrival timestamps
//! - `order`: Order, side and level back-reference types
//! - `trade`: Match records produced by the fill algorithm
//! - `errors`: Error taxonomy

pub mod clock;
pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
