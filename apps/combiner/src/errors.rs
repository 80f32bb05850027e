use thiserror::Error;

/// Crate-level result alias.
pub type Result<T> = std::result::Result<T, CombinerError>;

/// Errors raised while encoding, laying out or packing commands.
///
/// None of these are transient: they indicate bad input data or a caller bug,
/// and generation stops at the first one.
#[derive(Debug, Error)]
pub enum CombinerError {
    #[error("{kind} must be between {min} and {max} (inclusive), got {value}")]
    EncodingRange {
        kind: &'static str,
        min: i128,
        max: i128,
        value: i128,
    },

    #[error("Failed to match {value} ({type_name}) to any tag type")]
    UnsupportedType {
        value: String,
        type_name: &'static str,
    },

    #[error("Curve index {index} out of range (length {length})")]
    IndexOutOfRange { index: usize, length: usize },

    #[error(
        "Item {index} encodes to {encoded_len} characters but only {budget} fit in a chunk"
    )]
    OverBudgetItem {
        index: usize,
        encoded_len: usize,
        budget: usize,
    },

    #[error("Unresolved grid extent: {0}")]
    UnresolvedExtent(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
