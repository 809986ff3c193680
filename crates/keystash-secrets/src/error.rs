//! Error types for secret storage.

use thiserror::Error;

use crate::status::Status;

/// Errors surfaced by [`crate::SecretStore`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The value could not be converted to or from the stored payload.
    #[error("Conversion failure: value is not valid UTF-8")]
    ConversionFailure,

    /// An update targeted a key with no stored item.
    #[error("Item not found")]
    ItemNotFound,

    /// A read returned an item in a format other than a string payload.
    #[error("Invalid item format")]
    InvalidItemFormat,

    /// The vault reported success but its result had the wrong shape.
    #[error("Unexpected error: vault returned success without a data payload")]
    UnexpectedError,

    /// Any vault status not handled by the operation.
    #[error("Unexpected vault status: {0}")]
    UnexpectedStatus(Status),
}

impl StoreError {
    /// The raw vault status, for [`StoreError::UnexpectedStatus`].
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }
}

/// Convenience result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
