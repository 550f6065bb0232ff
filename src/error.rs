//! Error type shared by the capacity model and the route constructor.

use thiserror::Error;

/// Errors raised for structurally invalid planning input.
///
/// A load that does not fit a vehicle is never an error: it is reported
/// through [`CapacityResult::can_fit`](crate::capacity::CapacityResult) and
/// capacity violations on evaluated trips.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// An argument is outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A ratio against a zero vehicle capacity was requested.
    #[error("division by zero: {0} requires a non-zero vehicle capacity")]
    DivideByZero(&'static str),

    /// A line item has no resolved product record.
    #[error("line item for product {product_id} has no product record")]
    MissingProduct {
        /// Product identifier of the offending line item.
        product_id: String,
    },
}

impl PlanError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlanError>;
