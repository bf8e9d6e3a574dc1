//! Order book infrastructure module
//!
//! Contains price levels, the per-side level index and the two-sided book.

pub mod order_book;
pub mod price_level;
pub mod side_book;

pub use order_book::OrderBook;
pub use price_level::PriceLevel;
pub use side_book::SideBook;
