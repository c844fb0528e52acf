//! Error types for marketforge.

use thiserror::Error;

/// Result type alias for marketforge operations.
pub type Result<T> = std::result::Result<T, ForgeError>;

/// Error types for the analytics engine.
#[derive(Error, Debug)]
pub enum ForgeError {
    /// Symbol is not present in the asset catalog.
    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    /// No requested symbol resolved against the catalog.
    #[error("No valid assets")]
    NoValidAssets,

    /// Insufficient data for calculation.
    #[error("Insufficient data: need at least {required} elements, got {available}")]
    InsufficientData { required: usize, available: usize },

    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Empty data error.
    #[error("Empty data provided for {context}")]
    EmptyData { context: String },
}

impl ForgeError {
    /// Create an unknown symbol error.
    pub fn unknown_symbol(symbol: impl Into<String>) -> Self {
        Self::UnknownSymbol {
            symbol: symbol.into(),
        }
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(required: usize, available: usize) -> Self {
        Self::InsufficientData {
            required,
            available,
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an empty data error.
    pub fn empty_data(context: impl Into<String>) -> Self {
        Self::EmptyData {
            context: context.into(),
        }
    }
}
