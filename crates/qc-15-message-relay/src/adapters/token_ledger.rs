//! Token Ledger Adapter
//!
//! Implements `TokenLedger` port with an in-memory multi-token balance book.

use crate::domain::{Address, RelayError};
use crate::ports::outbound::TokenLedger;
use async_trait::async_trait;
use parking_lot::RwLock;
use primitive_types::U256;
use std::collections::HashMap;
use tracing::debug;

/// Recorded spend authorization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Approval {
    /// Token approved.
    pub token: Address,
    /// Account whose balance may be spent.
    pub owner: Address,
    /// Account allowed to spend.
    pub spender: Address,
    /// Allowance granted.
    pub amount: U256,
}

/// In-memory token ledger.
///
/// Keeps a log of every `approve` call so callers can assert on
/// authorization side effects.
#[derive(Default)]
pub struct InMemoryTokenLedger {
    /// (token, account) -> balance.
    balances: RwLock<HashMap<(Address, Address), U256>>,
    /// (token, owner, spender) -> allowance.
    allowances: RwLock<HashMap<(Address, Address, Address), U256>>,
    /// Every approve call, in order.
    approvals: RwLock<Vec<Approval>>,
    /// Reject every direct transfer when set.
    reject_transfers: RwLock<bool>,
}

impl InMemoryTokenLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `token` to `account`.
    pub fn mint(&self, token: Address, account: Address, amount: U256) {
        let mut balances = self.balances.write();
        let entry = balances.entry((token, account)).or_default();
        *entry = entry.saturating_add(amount);
    }

    /// Current balance, zero if unknown.
    pub fn balance(&self, token: Address, account: Address) -> U256 {
        self.balances
            .read()
            .get(&(token, account))
            .copied()
            .unwrap_or_default()
    }

    /// Current allowance, zero if unknown.
    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.allowances
            .read()
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Make every subsequent `transfer` fail.
    pub fn set_reject_transfers(&self, reject: bool) {
        *self.reject_transfers.write() = reject;
    }

    /// All approve calls seen so far.
    pub fn approvals(&self) -> Vec<Approval> {
        self.approvals.read().clone()
    }

    /// Spend `amount` of `from`'s `token` under `spender`'s allowance.
    pub fn transfer_from(
        &self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), RelayError> {
        let mut allowances = self.allowances.write();
        let allowance = allowances
            .get(&(token, from, spender))
            .copied()
            .unwrap_or_default();
        if allowance < amount {
            return Err(RelayError::Ledger(format!(
                "allowance {} below {}",
                allowance, amount
            )));
        }

        self.move_balance(token, from, to, amount)?;
        allowances.insert((token, from, spender), allowance - amount);
        Ok(())
    }

    fn move_balance(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), RelayError> {
        let mut balances = self.balances.write();
        let available = balances.get(&(token, from)).copied().unwrap_or_default();
        if available < amount {
            return Err(RelayError::Ledger(format!(
                "balance {} below {}",
                available, amount
            )));
        }

        balances.insert((token, from), available - amount);
        let entry = balances.entry((token, to)).or_default();
        *entry = entry.saturating_add(amount);
        Ok(())
    }
}

#[async_trait]
impl TokenLedger for InMemoryTokenLedger {
    async fn balance_of(&self, token: Address, account: Address) -> Result<U256, RelayError> {
        Ok(self.balance(token, account))
    }

    async fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), RelayError> {
        debug!(
            "[qc-15] Approving {} of token {:02x}{:02x}... for spender {:02x}{:02x}...",
            amount, token[0], token[1], spender[0], spender[1]
        );

        self.allowances
            .write()
            .insert((token, owner, spender), amount);
        self.approvals.write().push(Approval {
            token,
            owner,
            spender,
            amount,
        });
        Ok(())
    }

    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), RelayError> {
        if *self.reject_transfers.read() {
            return Err(RelayError::Ledger("token transfer reverted".to_string()));
        }
        self.move_balance(token, from, to, amount)
    }
}
