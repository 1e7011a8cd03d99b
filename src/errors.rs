//! Unified error types and result handling.

use rust_decimal::Decimal;
use thiserror::Error;

/// Every failure the crate can surface to a caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid settings or rejected user input
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any failure reported by the database layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No invoice exists with this id
    #[error("Invoice not found: {id}")]
    InvoiceNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No card exists with this id
    #[error("Card not found: {id}")]
    CardNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// Amounts must be non-negative
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// The (year, month) pair does not name a calendar month
    #[error("Invalid month setting: {year}-{month}")]
    InvalidMonth {
        /// Rejected year
        year: i32,
        /// Rejected month
        month: i32,
    },

    /// I/O failure, typically while reading the settings file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
