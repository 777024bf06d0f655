//! Ledger Port - atomic value transfer between accounts
//!
//! The engine never moves money itself; it calls this narrow interface.
//! A transfer is all-or-nothing: either both account balances change or
//! neither does. There is no retry policy - a failed transfer surfaces
//! immediately to the caller.

use std::sync::Mutex;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core_types::{AccountId, Amount};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    #[error("insufficient funds in source account")]
    InsufficientFunds,

    #[error("destination balance would overflow")]
    BalanceOverflow,

    #[error("source and destination accounts are the same")]
    SameAccount,
}

/// Narrow transfer capability injected into the engine.
///
/// Implementations must be all-or-nothing per call. The engine invokes
/// this while holding the pool lock, so per-pool ordering of transfers
/// follows operation ordering.
pub trait LedgerPort: Send + Sync {
    fn transfer(&self, from: AccountId, to: AccountId, amount: Amount)
    -> Result<(), TransferError>;
}

/// In-memory ledger used by the default wiring and by tests.
///
/// # Invariants (enforced):
/// - Sum of all balances only changes through `deposit`
/// - `transfer` validates first, then applies both sides under one lock
/// - Checked arithmetic everywhere; overflow is an error, not a wrap
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    accounts: Mutex<FxHashMap<AccountId, Amount>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account out of thin air. Funding entry point for the
    /// mock deposit endpoint and for tests; a real ledger has no analog.
    pub fn deposit(&self, account: AccountId, amount: Amount) -> Result<(), TransferError> {
        let mut accounts = self.accounts.lock().expect("ledger lock poisoned");
        let balance = accounts.entry(account).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(TransferError::BalanceOverflow)?;
        Ok(())
    }

    /// Read-only balance snapshot (missing account reads as 0).
    pub fn balance_of(&self, account: AccountId) -> Amount {
        let accounts = self.accounts.lock().expect("ledger lock poisoned");
        accounts.get(&account).copied().unwrap_or(0)
    }
}

impl LedgerPort for InMemoryLedger {
    fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if from == to {
            return Err(TransferError::SameAccount);
        }
        if amount == 0 {
            return Ok(());
        }

        let mut accounts = self.accounts.lock().expect("ledger lock poisoned");

        // Validate both sides before touching either
        let from_balance = accounts.get(&from).copied().unwrap_or(0);
        let new_from = from_balance
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientFunds)?;
        let to_balance = accounts.get(&to).copied().unwrap_or(0);
        let new_to = to_balance
            .checked_add(amount)
            .ok_or(TransferError::BalanceOverflow)?;

        accounts.insert(from, new_from);
        accounts.insert(to, new_to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_and_transfer() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(1, 100).unwrap();

        ledger.transfer(1, 2, 60).unwrap();
        assert_eq!(ledger.balance_of(1), 40);
        assert_eq!(ledger.balance_of(2), 60);
    }

    #[test]
    fn test_transfer_insufficient_leaves_both_untouched() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(1, 50).unwrap();

        let result = ledger.transfer(1, 2, 100);
        assert_eq!(result, Err(TransferError::InsufficientFunds));
        assert_eq!(ledger.balance_of(1), 50);
        assert_eq!(ledger.balance_of(2), 0);
    }

    #[test]
    fn test_transfer_from_unknown_account_fails() {
        let ledger = InMemoryLedger::new();
        assert_eq!(
            ledger.transfer(99, 2, 1),
            Err(TransferError::InsufficientFunds)
        );
    }

    #[test]
    fn test_transfer_to_self_rejected() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(1, 10).unwrap();
        assert_eq!(ledger.transfer(1, 1, 5), Err(TransferError::SameAccount));
        assert_eq!(ledger.balance_of(1), 10);
    }

    #[test]
    fn test_zero_transfer_is_noop() {
        let ledger = InMemoryLedger::new();
        assert_eq!(ledger.transfer(1, 2, 0), Ok(()));
        assert_eq!(ledger.balance_of(2), 0);
    }

    #[test]
    fn test_overflow_rejected_before_apply() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(1, 100).unwrap();
        ledger.deposit(2, u64::MAX).unwrap();

        assert_eq!(
            ledger.transfer(1, 2, 1),
            Err(TransferError::BalanceOverflow)
        );
        // Source must not have been debited
        assert_eq!(ledger.balance_of(1), 100);
    }
}
