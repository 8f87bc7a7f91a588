//! Two-phase coin selection for spending.
//!
//! Phase one looks for a single coin worth exactly the requested amount
//! and removes it, leaving the rest of the sequence untouched. Phase two
//! is greedy change-making: coins are consumed largest-first until the
//! amount is covered, and the one partially-consumed coin (if any) is
//! traded for a change coin appended at the end of the sequence.
//!
//! The exact-match phase wins even when smaller coins could combine to
//! the amount. This is a shortcut, not a change-minimizing solver: the
//! greedy pass makes no claim about the number of coins touched.

use crate::error::WalletError;

/// Result of a spend: the surviving coin sequence and what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendOutcome {
    /// Coin sequence after the spend, in final order.
    pub coins: Vec<u64>,
    /// Coins removed from the wallet, in consumption order.
    pub consumed: Vec<u64>,
    /// Change coin appended at the end of the sequence, if one was cut.
    pub change: Option<u64>,
}

/// Two-phase spend planner.
///
/// Pure: plans against a coin slice and returns the resulting sequence,
/// so callers mutate their state only once planning has succeeded.
pub struct CoinSelector;

impl CoinSelector {
    /// Plan a spend of `amount` against the given coins.
    ///
    /// Fails with [`WalletError::InvalidAmount`] for a zero amount and
    /// [`WalletError::InsufficientFunds`] when `amount` exceeds the total.
    pub fn spend(coins: &[u64], amount: u64) -> Result<SpendOutcome, WalletError> {
        if amount == 0 {
            return Err(WalletError::InvalidAmount(
                "spend amount must be non-zero".into(),
            ));
        }

        let total: u64 = coins.iter().sum();
        if amount > total {
            return Err(WalletError::InsufficientFunds {
                have: total,
                need: amount,
            });
        }

        // Phase one: first coin equal to the amount, removed in place.
        if let Some(index) = coins.iter().position(|&c| c == amount) {
            let mut remaining = coins.to_vec();
            remaining.remove(index);
            tracing::debug!(amount, index, "spend satisfied by exact match");
            return Ok(SpendOutcome {
                coins: remaining,
                consumed: vec![amount],
                change: None,
            });
        }

        // Phase two: greedy largest-first. Relative order of equal coins
        // after the sort is unspecified.
        let mut sorted = coins.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let mut left = amount;
        let mut consumed = Vec::new();
        let mut change = None;
        let mut visited = 0;

        for &coin in &sorted {
            visited += 1;
            consumed.push(coin);
            if left >= coin {
                left -= coin;
            } else {
                change = Some(coin - left);
                left = 0;
            }
            if left == 0 {
                break;
            }
        }

        let mut remaining = sorted.split_off(visited);
        if let Some(value) = change {
            remaining.push(value);
        }

        tracing::debug!(
            amount,
            consumed = consumed.len(),
            change,
            "spend satisfied by greedy change-making"
        );

        Ok(SpendOutcome {
            coins: remaining,
            consumed,
            change,
        })
    }
}
