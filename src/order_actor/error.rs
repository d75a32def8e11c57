use thiserror::Error;
use crate::actor_framework::FrameworkError;

/// Errors that can occur during order operations.
///
/// The three rejection causes of order creation are kept apart so callers
/// can tell an unknown user from an unknown or unavailable product.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Invalid user: {0}")]
    InvalidUser(u64),
    #[error("Invalid product: {0}")]
    InvalidProduct(u64),
    #[error("Product out of stock: {0}")]
    OutOfStock(u64),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    /// True for the causes that mean "no order was created" rather than a
    /// broken store.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            OrderError::InvalidUser(_) | OrderError::InvalidProduct(_) | OrderError::OutOfStock(_)
        )
    }
}

impl From<FrameworkError> for OrderError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::Rejected(reason) => OrderError::ValidationError(reason),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
