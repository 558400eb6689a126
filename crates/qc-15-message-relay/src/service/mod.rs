//! # Message Relay Service
//!
//! Owns the whitelist, the received-message state and the principal, and
//! drives the outbound ports.
//!
//! ## Concurrency
//!
//! Every mutating operation takes `&mut self` and runs to completion before
//! the next one starts. Wrap the service in a `tokio::sync::Mutex` to share
//! it between tasks.

mod admin;
mod dispatcher;
mod receiver;

pub use receiver::Receiver;

use crate::config::{ConfigError, RelayConfig};
use crate::domain::{
    Address, ChainSelector, InboundEnvelope, MessageId, ReceivedState, RelayError, RelayStats,
    WhitelistGate,
};
use crate::ports::inbound::MessageRelayApi;
use crate::ports::outbound::{EventPublisher, NativeVault, Router, TokenLedger};
use async_trait::async_trait;
use primitive_types::U256;
use std::sync::Arc;
use tracing::info;

/// Cross-chain message relay.
pub struct MessageRelayService<R, L, N, E> {
    /// Validated configuration.
    config: RelayConfig,
    /// Current principal.
    owner: Address,
    /// Proposed principal awaiting acceptance.
    pending_owner: Option<Address>,
    /// Destination whitelist.
    whitelist: WhitelistGate,
    /// Inbound acceptance and last received message.
    receiver: Receiver,
    /// Router port.
    router: Arc<R>,
    /// Token ledger port.
    ledger: Arc<L>,
    /// Native balance port.
    vault: Arc<N>,
    /// Audit event sink.
    events: Arc<E>,
    /// Operational counters.
    stats: RelayStats,
}

impl<R, L, N, E> MessageRelayService<R, L, N, E>
where
    R: Router,
    L: TokenLedger,
    N: NativeVault,
    E: EventPublisher,
{
    /// Create a relay from a configuration and its outbound ports.
    pub fn new(
        config: RelayConfig,
        router: Arc<R>,
        ledger: Arc<L>,
        vault: Arc<N>,
        events: Arc<E>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        info!(
            relay = %hex::encode(config.relay),
            router = %hex::encode(config.router),
            "[qc-15] Message relay initialized"
        );

        Ok(Self {
            owner: config.owner,
            pending_owner: None,
            whitelist: WhitelistGate::new(),
            receiver: Receiver::new(config.router),
            router,
            ledger,
            vault,
            events,
            stats: RelayStats::default(),
            config,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Proposed principal, if a handover is in progress.
    pub fn pending_owner(&self) -> Option<Address> {
        self.pending_owner
    }

    /// Whitelisted destinations, in ascending selector order.
    pub fn whitelisted_destinations(&self) -> Vec<ChainSelector> {
        let mut destinations: Vec<_> = self.whitelist.whitelisted().collect();
        destinations.sort();
        destinations
    }
}

#[async_trait]
impl<R, L, N, E> MessageRelayApi for MessageRelayService<R, L, N, E>
where
    R: Router,
    L: TokenLedger,
    N: NativeVault,
    E: EventPublisher,
{
    fn set_whitelisted(
        &mut self,
        caller: Address,
        destination: ChainSelector,
        whitelisted: bool,
    ) -> Result<(), RelayError> {
        self.apply_whitelist(caller, destination, whitelisted)
    }

    fn is_whitelisted(&self, destination: ChainSelector) -> bool {
        self.whitelist.is_whitelisted(destination)
    }

    async fn quote_fee(
        &self,
        destination: ChainSelector,
        receiver: Address,
        text: &str,
    ) -> Result<U256, RelayError> {
        self.quote(destination, receiver, text).await
    }

    async fn send_message(
        &mut self,
        caller: Address,
        destination: ChainSelector,
        receiver: Address,
        text: &str,
    ) -> Result<MessageId, RelayError> {
        self.dispatch(caller, destination, receiver, text).await
    }

    fn accept_message(
        &mut self,
        caller: Address,
        envelope: InboundEnvelope,
    ) -> Result<(), RelayError> {
        self.accept_inbound(caller, envelope)
    }

    fn last_received(&self) -> &ReceivedState {
        self.receiver.state()
    }

    async fn sweep_native(
        &mut self,
        caller: Address,
        beneficiary: Address,
    ) -> Result<U256, RelayError> {
        self.sweep_native_balance(caller, beneficiary).await
    }

    async fn sweep_token(
        &mut self,
        caller: Address,
        beneficiary: Address,
        token: Address,
    ) -> Result<U256, RelayError> {
        self.sweep_token_balance(caller, beneficiary, token).await
    }

    fn transfer_ownership(&mut self, caller: Address, to: Address) -> Result<(), RelayError> {
        self.propose_owner(caller, to)
    }

    fn accept_ownership(&mut self, caller: Address) -> Result<(), RelayError> {
        self.confirm_owner(caller)
    }

    fn owner(&self) -> Address {
        self.owner
    }

    fn stats(&self) -> RelayStats {
        self.stats.clone()
    }
}
