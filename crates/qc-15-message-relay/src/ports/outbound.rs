//! # Outbound Ports
//!
//! Traits for external dependencies: the router that carries messages
//! between chains, the token ledger fees are paid from, the native balance
//! holder, and the audit event sink.

use crate::domain::{Address, ChainSelector, MessageId, OutboundEnvelope, RelayError, RelayEvent};
use async_trait::async_trait;
use primitive_types::U256;

/// Cross-chain router - outbound port.
///
/// Quotes are computed per call and must not be cached by callers.
#[async_trait]
pub trait Router: Send + Sync {
    /// Quote the fee for delivering `envelope` to `destination`.
    async fn get_fee(
        &self,
        destination: ChainSelector,
        envelope: &OutboundEnvelope,
    ) -> Result<U256, RelayError>;

    /// Dispatch `envelope` on behalf of `sender`.
    ///
    /// The router collects the fee from `sender` using a prior spend
    /// authorization and returns a fresh message identifier.
    async fn send(
        &self,
        sender: Address,
        destination: ChainSelector,
        envelope: OutboundEnvelope,
    ) -> Result<MessageId, RelayError>;
}

/// Fungible token ledger - outbound port.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Balance of `account` in `token`.
    async fn balance_of(&self, token: Address, account: Address) -> Result<U256, RelayError>;

    /// Authorize `spender` to move up to `amount` of `owner`'s `token`.
    async fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), RelayError>;

    /// Move `amount` of `token` from `from` to `to`.
    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), RelayError>;
}

/// Native currency holder - outbound port.
#[async_trait]
pub trait NativeVault: Send + Sync {
    /// Native balance of `account`.
    async fn balance_of(&self, account: Address) -> Result<U256, RelayError>;

    /// Send native value. `Ok(false)` means the recipient rejected it.
    async fn send_value(&self, from: Address, to: Address, amount: U256)
        -> Result<bool, RelayError>;
}

/// Audit event sink - outbound port.
pub trait EventPublisher: Send + Sync {
    /// Record an event.
    fn publish(&self, event: RelayEvent);
}
