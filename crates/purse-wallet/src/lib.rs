//! # purse-wallet — file-backed coin wallet with two-phase coin selection.
//!
//! A wallet is an ordered multiset of positive coin denominations persisted
//! as one comma-separated line of text. Opening a wallet acquires an
//! exclusive cross-process lock on the backing file; committing persists
//! the coins and releases the lock. Spending prefers an exact-match coin
//! and otherwise makes change greedily, largest coin first.
//!
//! # Modules
//!
//! - [`error`] — `WalletError` enum
//! - [`format`] — comma-separated wallet file codec
//! - [`guard`] — `LockGuard`, the cross-process lock marker
//! - [`coin_selection`] — two-phase spend planner
//! - [`wallet`] — high-level wallet composition

pub mod coin_selection;
pub mod error;
pub mod format;
pub mod guard;
pub mod wallet;

// Re-exports for convenient access
pub use coin_selection::{CoinSelector, SpendOutcome};
pub use error::WalletError;
pub use guard::{LockGuard, LOCK_SUFFIX};
pub use wallet::{CommitError, Wallet};
