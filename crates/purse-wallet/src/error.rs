//! Wallet error types.

use thiserror::Error;

/// Errors that can occur in wallet operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Wallet path is empty or does not point at an existing file.
    #[error("invalid wallet path: {0}")]
    InvalidPath(String),

    /// Another instance holds the lock on this wallet file.
    #[error("wallet is locked: {0}")]
    Locked(String),

    /// Invalid monetary amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Spend amount exceeds the wallet balance.
    #[error("insufficient funds: have {have}, need {need}")]
    InsufficientFunds {
        /// Available balance.
        have: u64,
        /// Requested amount.
        need: u64,
    },

    /// Reading or writing the wallet file failed.
    #[error("persistence failure: {0}")]
    Persistence(String),
}
