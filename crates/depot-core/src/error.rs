//! Validation errors raised before any I/O takes place.

use thiserror::Error;

use crate::chiller::ChillerId;

/// Validation errors for domain operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The category string does not name a known category.
    #[error("unknown category: {value}")]
    UnknownCategory { value: String },

    /// The chiller value does not resolve to chillers 1-4.
    #[error("invalid chiller: {value} (expected 1-4)")]
    InvalidChiller { value: String },

    /// A loadout or transfer quantity must be strictly positive.
    #[error("quantity must be greater than zero, got {quantity}")]
    QuantityNotPositive { quantity: f64 },

    /// The requested quantity exceeds what the ledger records for the chiller.
    #[error(
        "cannot remove {requested} items from chiller {chiller}: only {available} available in stored totals"
    )]
    InsufficientStock {
        chiller: ChillerId,
        requested: f64,
        available: f64,
    },

    /// Transfer source and destination must differ.
    #[error("cannot transfer from chiller {chiller} to itself")]
    SameChiller { chiller: ChillerId },

    /// The source chiller has no entries to derive proportions from.
    #[error("no entries found in chiller {chiller}")]
    EmptyChiller { chiller: ChillerId },
}
