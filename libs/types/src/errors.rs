//! Error types for book values
//!
//! Error taxonomy using thiserror

use thiserror::Error;

use crate::ids::OrderId;

/// Errors constructing prices and quantities
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    #[error("Invalid decimal: {0}")]
    Parse(String),

    #[error("Price must be positive, got {0}")]
    NonPositivePrice(String),

    #[error("Quantity must not be negative, got {0}")]
    NegativeQuantity(String),
}

/// Order-specific errors
///
/// Every variant is raised before the book is touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Order {order_id} is already resting in the book")]
    AlreadyResting { order_id: OrderId },

    #[error("Order {order_id} is already filled")]
    AlreadyFilled { order_id: OrderId },
}
