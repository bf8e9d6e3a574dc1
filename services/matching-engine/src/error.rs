//! Order book errors

use book_types::errors::OrderError;
use book_types::numeric::Quantity;
use book_types::order::Side;
use thiserror::Error;

/// Errors returned by order book operations
///
/// None of these leave the book partially mutated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookError {
    /// The opposing side cannot absorb the whole market order. Expected under
    /// thin markets; the caller may retry with a smaller size.
    #[error("not enough liquidity on the {} side: requested {requested}, available {available}", .side.as_str())]
    InsufficientLiquidity {
        /// Side whose levels would have been consumed
        side: Side,
        requested: Quantity,
        available: Quantity,
    },

    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] OrderError),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl BookError {
    /// True for rejections a caller can act on by resubmitting
    pub fn is_insufficient_liquidity(&self) -> bool {
        matches!(self, BookError::InsufficientLiquidity { .. })
    }
}
