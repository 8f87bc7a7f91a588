//! Cross-process exclusive access to a wallet file.
//!
//! Exclusivity is a marker file next to the wallet file (`<path>.lock`).
//! Its content is irrelevant; only its presence matters. Acquisition is an
//! atomic create-if-absent via [`OpenOptions::create_new`], which is
//! stronger than a separate existence check followed by a create: two
//! processes racing on the same wallet cannot both acquire the lock.
//!
//! There is no `Drop` impl. A wallet abandoned without committing leaves
//! its marker on disk, and a later open fails until the marker is removed
//! out of band. That leak is part of the contract; release happens only
//! through [`Wallet::commit`](crate::wallet::Wallet::commit).

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::error::WalletError;

/// Suffix appended to the wallet path to form the marker path.
pub const LOCK_SUFFIX: &str = ".lock";

/// Held lock on a wallet file.
///
/// Acquired exactly once at open time; released exactly once at commit
/// time by consuming the guard.
#[derive(Debug)]
pub struct LockGuard {
    marker: PathBuf,
}

impl LockGuard {
    /// Marker path for a given wallet path.
    pub fn marker_path(wallet_path: &Path) -> PathBuf {
        let mut os = wallet_path.as_os_str().to_os_string();
        os.push(LOCK_SUFFIX);
        PathBuf::from(os)
    }

    /// Whether a lock marker currently exists for the given wallet path.
    pub fn is_held(wallet_path: &Path) -> bool {
        Self::marker_path(wallet_path).exists()
    }

    /// Acquire the lock for a wallet file.
    ///
    /// Single point-in-time attempt: fails immediately with
    /// [`WalletError::Locked`] if the marker already exists. No blocking,
    /// no polling, no retry.
    pub fn acquire(wallet_path: &Path) -> Result<Self, WalletError> {
        let marker = Self::marker_path(wallet_path);
        match OpenOptions::new().write(true).create_new(true).open(&marker) {
            Ok(_) => {
                tracing::debug!(marker = %marker.display(), "lock acquired");
                Ok(Self { marker })
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(WalletError::Locked(wallet_path.display().to_string()))
            }
            Err(e) => Err(WalletError::Persistence(format!(
                "failed to create lock marker {}: {e}",
                marker.display()
            ))),
        }
    }

    /// Release the lock by removing the marker file.
    ///
    /// Consumes the guard; there is no path back to `Held`.
    pub fn release(self) -> Result<(), WalletError> {
        std::fs::remove_file(&self.marker).map_err(|e| {
            WalletError::Persistence(format!(
                "failed to remove lock marker {}: {e}",
                self.marker.display()
            ))
        })?;
        tracing::debug!(marker = %self.marker.display(), "lock released");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_wallet_path() -> (PathBuf, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.data");
        std::fs::write(&path, "").unwrap();
        (path, dir)
    }

    #[test]
    fn marker_path_appends_suffix() {
        let marker = LockGuard::marker_path(Path::new("/tmp/wallet.data"));
        assert_eq!(marker, Path::new("/tmp/wallet.data.lock"));
    }

    #[test]
    fn acquire_creates_marker() {
        let (path, _dir) = temp_wallet_path();
        assert!(!LockGuard::is_held(&path));

        let guard = LockGuard::acquire(&path).unwrap();
        assert!(LockGuard::is_held(&path));
        drop(guard);
    }

    #[test]
    fn second_acquire_fails() {
        let (path, _dir) = temp_wallet_path();
        let _guard = LockGuard::acquire(&path).unwrap();

        let err = LockGuard::acquire(&path).unwrap_err();
        assert!(matches!(err, WalletError::Locked(_)));
    }

    #[test]
    fn release_removes_marker() {
        let (path, _dir) = temp_wallet_path();
        let guard = LockGuard::acquire(&path).unwrap();

        guard.release().unwrap();
        assert!(!LockGuard::is_held(&path));
    }

    #[test]
    fn acquire_after_release_succeeds() {
        let (path, _dir) = temp_wallet_path();
        LockGuard::acquire(&path).unwrap().release().unwrap();

        let guard = LockGuard::acquire(&path).unwrap();
        assert!(LockGuard::is_held(&path));
        drop(guard);
    }

    #[test]
    fn drop_without_release_leaves_marker() {
        let (path, _dir) = temp_wallet_path();
        {
            let _guard = LockGuard::acquire(&path).unwrap();
        }
        // Abandonment leaks the marker; only release() removes it.
        assert!(LockGuard::is_held(&path));
    }

    #[test]
    fn acquire_fails_when_marker_preexists() {
        let (path, _dir) = temp_wallet_path();
        std::fs::write(LockGuard::marker_path(&path), "stale").unwrap();

        let err = LockGuard::acquire(&path).unwrap_err();
        assert!(matches!(err, WalletError::Locked(_)));
    }
}
