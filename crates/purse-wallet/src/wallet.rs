//! Wallet composition: lock lifecycle, coin multiset, file persistence.
//!
//! A [`Wallet`] is opened against an existing file, holds the lock for its
//! whole lifetime, and is torn down by [`Wallet::commit`], which persists
//! the coins and only then releases the lock. A wallet that is dropped
//! without committing keeps the on-disk lock marker.

use std::path::{Path, PathBuf};

use crate::coin_selection::{CoinSelector, SpendOutcome};
use crate::error::WalletError;
use crate::format;
use crate::guard::LockGuard;

/// Failed commit.
///
/// Persist-then-release means there are two distinct failure points. A
/// write failure keeps the lock held and hands the wallet back so the
/// caller can retry or abandon deliberately; a release failure means the
/// coins are already safely on disk but the marker file would not unlink.
#[derive(Debug)]
pub enum CommitError {
    /// Writing the wallet file failed; the lock stays held.
    Persist {
        /// The wallet, unchanged, still holding its lock.
        wallet: Wallet,
        /// What went wrong during the write.
        source: WalletError,
    },
    /// The file was written but the lock marker could not be removed.
    Release {
        /// What went wrong removing the marker.
        source: WalletError,
    },
}

impl CommitError {
    /// The underlying wallet error.
    pub fn source_error(&self) -> &WalletError {
        match self {
            CommitError::Persist { source, .. } | CommitError::Release { source } => source,
        }
    }
}

impl std::fmt::Display for CommitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitError::Persist { source, .. } => {
                write!(f, "commit failed, lock still held: {source}")
            }
            CommitError::Release { source } => {
                write!(f, "wallet persisted but lock not released: {source}")
            }
        }
    }
}

impl std::error::Error for CommitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source_error())
    }
}

/// File-backed coin wallet.
///
/// Holds an ordered multiset of positive coin denominations and a cached
/// balance that always equals their sum. All mutation happens under the
/// exclusive file lock acquired at open time.
pub struct Wallet {
    path: PathBuf,
    coins: Vec<u64>,
    sum: u64,
    lock: LockGuard,
}

impl Wallet {
    /// Open the wallet at `path`, acquiring its lock and loading its coins.
    ///
    /// Fails with [`WalletError::InvalidPath`] for an empty path or a file
    /// that does not exist, and [`WalletError::Locked`] if another instance
    /// holds the lock. On any failure no state is created: a lock marker
    /// created by this call is removed again if the subsequent load fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(WalletError::InvalidPath("path is empty".into()));
        }
        if !path.is_file() {
            return Err(WalletError::InvalidPath(format!(
                "{} does not exist",
                path.display()
            )));
        }

        let lock = LockGuard::acquire(path)?;

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                // Abort construction entirely: don't strand a marker the
                // caller never got a wallet for.
                lock.release()?;
                return Err(WalletError::Persistence(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        let coins = format::parse_coins(&content);
        let sum = coins.iter().sum();

        tracing::debug!(
            path = %path.display(),
            coins = coins.len(),
            sum,
            "wallet opened"
        );

        Ok(Self {
            path: path.to_path_buf(),
            coins,
            sum,
            lock,
        })
    }

    /// Current balance: the sum of all coins.
    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// The coin denominations in their current order.
    pub fn coins(&self) -> &[u64] {
        &self.coins
    }

    /// Number of coins currently held.
    pub fn coin_count(&self) -> usize {
        self.coins.len()
    }

    /// Add a coin of the given value at the end of the sequence.
    ///
    /// Fails with [`WalletError::InvalidAmount`] for a zero amount, leaving
    /// the wallet unchanged.
    pub fn add(&mut self, amount: u64) -> Result<(), WalletError> {
        if amount == 0 {
            return Err(WalletError::InvalidAmount(
                "add amount must be non-zero".into(),
            ));
        }
        self.coins.push(amount);
        self.sum = self.coins.iter().sum();
        tracing::debug!(amount, sum = self.sum, "coin added");
        Ok(())
    }

    /// Spend the given amount using two-phase coin selection.
    ///
    /// See [`CoinSelector::spend`] for the policy. On error the wallet is
    /// left exactly as it was; on success the returned [`SpendOutcome`]
    /// describes the consumed coins and any change coin.
    pub fn spend(&mut self, amount: u64) -> Result<SpendOutcome, WalletError> {
        let outcome = CoinSelector::spend(&self.coins, amount)?;
        self.coins = outcome.coins.clone();
        self.sum = self.coins.iter().sum();
        tracing::debug!(amount, sum = self.sum, "coins spent");
        Ok(outcome)
    }

    /// Persist the coins to the wallet file, then release the lock.
    ///
    /// Consuming `self` makes commit at-most-once by construction. The
    /// ordering is mandatory: if the write fails the lock is NOT released,
    /// and the wallet comes back inside the [`CommitError`] for a retry.
    pub fn commit(self) -> Result<(), CommitError> {
        let line = format::encode_coins(&self.coins);
        if let Err(e) = std::fs::write(&self.path, &line) {
            let source = WalletError::Persistence(format!(
                "failed to write {}: {e}",
                self.path.display()
            ));
            return Err(CommitError::Persist {
                wallet: self,
                source,
            });
        }

        tracing::info!(
            path = %self.path.display(),
            coins = self.coins.len(),
            sum = self.sum,
            "wallet committed"
        );

        self.lock
            .release()
            .map_err(|source| CommitError::Release { source })
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("path", &self.path)
            .field("coins", &self.coins.len())
            .field("sum", &self.sum)
            .finish()
    }
}
