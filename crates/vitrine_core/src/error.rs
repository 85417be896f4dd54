//! Document error types

use thiserror::Error;

/// Errors raised while building or mutating a [`Document`](crate::Document)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// Another element already uses this id
    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    /// The node handle does not belong to this document
    #[error("Unknown node")]
    UnknownNode,

    /// Element boxes must have finite, non-negative dimensions
    #[error("Invalid element box: width {width}, margins {margin_left}/{margin_right}")]
    InvalidBox {
        width: f32,
        margin_left: f32,
        margin_right: f32,
    },

    /// A scroll strip viewport must be finite and non-negative
    #[error("Invalid viewport width: {0}")]
    InvalidViewport(f32),
}

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;
