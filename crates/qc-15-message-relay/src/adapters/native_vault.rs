//! Native Vault Adapter
//!
//! Implements `NativeVault` port with in-memory native balances.

use crate::domain::{Address, RelayError};
use crate::ports::outbound::NativeVault;
use async_trait::async_trait;
use parking_lot::RwLock;
use primitive_types::U256;
use std::collections::{HashMap, HashSet};

/// In-memory native balances.
///
/// Accounts registered with [`InMemoryNativeVault::reject_incoming`] refuse
/// value, modelling a recipient whose receive hook fails.
#[derive(Default)]
pub struct InMemoryNativeVault {
    balances: RwLock<HashMap<Address, U256>>,
    rejecting: RwLock<HashSet<Address>>,
}

impl InMemoryNativeVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account`.
    pub fn credit(&self, account: Address, amount: U256) {
        let mut balances = self.balances.write();
        let entry = balances.entry(account).or_default();
        *entry = entry.saturating_add(amount);
    }

    /// Current balance, zero if unknown.
    pub fn balance(&self, account: Address) -> U256 {
        self.balances
            .read()
            .get(&account)
            .copied()
            .unwrap_or_default()
    }

    /// Make `account` refuse incoming value.
    pub fn reject_incoming(&self, account: Address) {
        self.rejecting.write().insert(account);
    }
}

#[async_trait]
impl NativeVault for InMemoryNativeVault {
    async fn balance_of(&self, account: Address) -> Result<U256, RelayError> {
        Ok(self.balance(account))
    }

    async fn send_value(
        &self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool, RelayError> {
        if self.rejecting.read().contains(&to) {
            return Ok(false);
        }

        let mut balances = self.balances.write();
        let available = balances.get(&from).copied().unwrap_or_default();
        if available < amount {
            return Err(RelayError::Ledger(format!(
                "native balance {} below {}",
                available, amount
            )));
        }

        balances.insert(from, available - amount);
        let entry = balances.entry(to).or_default();
        *entry = entry.saturating_add(amount);
        Ok(true)
    }
}
