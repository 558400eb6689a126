//! # Inbound Ports
//!
//! API trait defining what the Message Relay subsystem can do.
//!
//! Every restricted operation takes the caller identity explicitly and
//! checks it before anything else.

use crate::domain::{
    Address, ChainSelector, InboundEnvelope, MessageId, ReceivedState, RelayError, RelayStats,
};
use async_trait::async_trait;
use primitive_types::U256;

/// Message relay API - inbound port.
#[async_trait]
pub trait MessageRelayApi: Send + Sync {
    /// Allow or deny a destination chain. Principal only.
    fn set_whitelisted(
        &mut self,
        caller: Address,
        destination: ChainSelector,
        whitelisted: bool,
    ) -> Result<(), RelayError>;

    /// Check whether a destination chain is whitelisted.
    fn is_whitelisted(&self, destination: ChainSelector) -> bool;

    /// Quote the fee a send would pay, without side effects.
    async fn quote_fee(
        &self,
        destination: ChainSelector,
        receiver: Address,
        text: &str,
    ) -> Result<U256, RelayError>;

    /// Send `text` to `receiver` on `destination`. Principal only.
    async fn send_message(
        &mut self,
        caller: Address,
        destination: ChainSelector,
        receiver: Address,
        text: &str,
    ) -> Result<MessageId, RelayError>;

    /// Accept an inbound message. `caller` must be the router.
    fn accept_message(
        &mut self,
        caller: Address,
        envelope: InboundEnvelope,
    ) -> Result<(), RelayError>;

    /// Most recently accepted inbound message.
    fn last_received(&self) -> &ReceivedState;

    /// Move the whole native balance to `beneficiary`. Principal only.
    async fn sweep_native(
        &mut self,
        caller: Address,
        beneficiary: Address,
    ) -> Result<U256, RelayError>;

    /// Move the whole `token` balance to `beneficiary`. Principal only.
    async fn sweep_token(
        &mut self,
        caller: Address,
        beneficiary: Address,
        token: Address,
    ) -> Result<U256, RelayError>;

    /// Propose a new principal. Principal only.
    fn transfer_ownership(&mut self, caller: Address, to: Address) -> Result<(), RelayError>;

    /// Accept a pending ownership transfer. Pending owner only.
    fn accept_ownership(&mut self, caller: Address) -> Result<(), RelayError>;

    /// Current principal.
    fn owner(&self) -> Address;

    /// Operational counters.
    fn stats(&self) -> RelayStats;
}
