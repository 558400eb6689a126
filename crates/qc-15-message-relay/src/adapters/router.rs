//! Router Adapter
//!
//! Implements `Router` port with an in-memory loopback router.

use super::token_ledger::InMemoryTokenLedger;
use crate::domain::{
    Address, ChainSelector, InboundEnvelope, MessageId, OutboundEnvelope, RelayError,
};
use crate::ports::outbound::Router;
use async_trait::async_trait;
use parking_lot::RwLock;
use primitive_types::U256;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info};

/// Message accepted by the router.
#[derive(Clone, Debug)]
pub struct SentMessage {
    /// Assigned identifier.
    pub message_id: MessageId,
    /// Destination chain.
    pub destination: ChainSelector,
    /// Account that paid for the send.
    pub sender: Address,
    /// Envelope as handed over.
    pub envelope: OutboundEnvelope,
    /// Fee collected.
    pub fee: U256,
}

/// In-memory router.
///
/// Collects fees through the shared token ledger using the sender's
/// allowance, the same way an on-chain router pulls its fee.
pub struct InMemoryRouter {
    /// Router's own account.
    address: Address,
    /// Ledger fees are collected on.
    ledger: Arc<InMemoryTokenLedger>,
    /// Flat fee per message.
    fee: RwLock<U256>,
    /// Send counter, mixed into message ids.
    nonce: RwLock<u64>,
    /// Accepted messages.
    sent: RwLock<Vec<SentMessage>>,
    /// Reject every send when set.
    reject_sends: RwLock<bool>,
    /// Reject every quote when set.
    reject_quotes: RwLock<bool>,
}

impl InMemoryRouter {
    /// Create a router at `address` charging `fee` per message.
    pub fn new(address: Address, ledger: Arc<InMemoryTokenLedger>, fee: U256) -> Self {
        Self {
            address,
            ledger,
            fee: RwLock::new(fee),
            nonce: RwLock::new(0),
            sent: RwLock::new(Vec::new()),
            reject_sends: RwLock::new(false),
            reject_quotes: RwLock::new(false),
        }
    }

    /// Router's own account.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Change the flat fee.
    pub fn set_fee(&self, fee: U256) {
        *self.fee.write() = fee;
    }

    /// Make every subsequent send fail.
    pub fn set_reject_sends(&self, reject: bool) {
        *self.reject_sends.write() = reject;
    }

    /// Make every subsequent quote fail.
    pub fn set_reject_quotes(&self, reject: bool) {
        *self.reject_quotes.write() = reject;
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.read().clone()
    }

    /// Number of messages accepted so far.
    pub fn send_count(&self) -> usize {
        self.sent.read().len()
    }

    /// Build the envelope a destination relay would receive for `message`.
    pub fn inbound_for(message: &SentMessage, source_chain: ChainSelector) -> InboundEnvelope {
        InboundEnvelope {
            message_id: message.message_id,
            source_chain,
            sender: message.sender,
            data: message.envelope.data.clone(),
            token_amounts: message.envelope.token_amounts.clone(),
        }
    }
}

/// Generate a message id from the send parameters.
fn generate_message_id(
    nonce: u64,
    destination: ChainSelector,
    sender: &Address,
    envelope: &OutboundEnvelope,
) -> MessageId {
    let mut hasher = Sha256::new();
    hasher.update(nonce.to_le_bytes());
    hasher.update(destination.0.to_le_bytes());
    hasher.update(sender);
    hasher.update(envelope.receiver);
    hasher.update(&envelope.data);

    let result = hasher.finalize();
    let mut id = [0u8; 32];
    id.copy_from_slice(&result);
    id
}

#[async_trait]
impl Router for InMemoryRouter {
    async fn get_fee(
        &self,
        destination: ChainSelector,
        _envelope: &OutboundEnvelope,
    ) -> Result<U256, RelayError> {
        if *self.reject_quotes.read() {
            return Err(RelayError::TransportFailure(format!(
                "no lane to {}",
                destination
            )));
        }

        let fee = *self.fee.read();
        debug!("[qc-15] Router quote for {}: {}", destination, fee);
        Ok(fee)
    }

    async fn send(
        &self,
        sender: Address,
        destination: ChainSelector,
        envelope: OutboundEnvelope,
    ) -> Result<MessageId, RelayError> {
        if *self.reject_sends.read() {
            return Err(RelayError::TransportFailure(
                "router rejected message".to_string(),
            ));
        }

        let fee = *self.fee.read();
        self.ledger
            .transfer_from(envelope.fee_token, self.address, sender, self.address, fee)
            .map_err(|e| RelayError::TransportFailure(e.to_string()))?;

        let message_id = {
            let mut nonce = self.nonce.write();
            *nonce += 1;
            generate_message_id(*nonce, destination, &sender, &envelope)
        };

        info!(
            "[qc-15] Router accepted message {:02x}{:02x}... for {}",
            message_id[0], message_id[1], destination
        );

        self.sent.write().push(SentMessage {
            message_id,
            destination,
            sender,
            envelope,
            fee,
        });

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{build_envelope, encode_text};
    use crate::ports::outbound::TokenLedger;

    const ROUTER: Address = [0x77u8; 20];
    const TOKEN: Address = [0x11u8; 20];
    const RELAY: Address = [0xAAu8; 20];

    fn setup(balance: u64, fee: u64) -> (Arc<InMemoryTokenLedger>, InMemoryRouter) {
        let ledger = Arc::new(InMemoryTokenLedger::new());
        ledger.mint(TOKEN, RELAY, U256::from(balance));
        let router = InMemoryRouter::new(ROUTER, ledger.clone(), U256::from(fee));
        (ledger, router)
    }

    fn envelope() -> OutboundEnvelope {
        build_envelope([0xABu8; 20], encode_text("hello"), TOKEN)
    }

    #[tokio::test]
    async fn test_send_collects_fee_with_allowance() {
        let (ledger, router) = setup(10, 3);
        ledger.approve(TOKEN, RELAY, ROUTER, U256::from(3)).await.unwrap();

        router.send(RELAY, ChainSelector(1), envelope()).await.unwrap();

        assert_eq!(ledger.balance(TOKEN, RELAY), U256::from(7));
        assert_eq!(ledger.balance(TOKEN, ROUTER), U256::from(3));
        assert_eq!(router.send_count(), 1);
    }

    #[tokio::test]
    async fn test_send_without_allowance_fails() {
        let (ledger, router) = setup(10, 3);
        let result = router.send(RELAY, ChainSelector(1), envelope()).await;
        assert!(matches!(result, Err(RelayError::TransportFailure(_))));
        assert_eq!(ledger.balance(TOKEN, RELAY), U256::from(10));
        assert_eq!(router.send_count(), 0);
    }

    #[tokio::test]
    async fn test_each_send_gets_new_id() {
        let (ledger, router) = setup(10, 1);
        ledger.approve(TOKEN, RELAY, ROUTER, U256::from(2)).await.unwrap();

        let a = router.send(RELAY, ChainSelector(1), envelope()).await.unwrap();
        let b = router.send(RELAY, ChainSelector(1), envelope()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_rejected_send() {
        let (ledger, router) = setup(10, 3);
        ledger.approve(TOKEN, RELAY, ROUTER, U256::from(3)).await.unwrap();
        router.set_reject_sends(true);

        let result = router.send(RELAY, ChainSelector(1), envelope()).await;
        assert!(matches!(result, Err(RelayError::TransportFailure(_))));
        assert_eq!(ledger.balance(TOKEN, RELAY), U256::from(10));
    }

    #[tokio::test]
    async fn test_inbound_for_carries_payload() {
        let (ledger, router) = setup(10, 0);
        ledger.approve(TOKEN, RELAY, ROUTER, U256::zero()).await.unwrap();
        router.send(RELAY, ChainSelector(1), envelope()).await.unwrap();

        let sent = &router.sent()[0];
        let inbound = InMemoryRouter::inbound_for(sent, ChainSelector(2));
        assert_eq!(inbound.message_id, sent.message_id);
        assert_eq!(inbound.sender, RELAY);
        assert_eq!(inbound.data, encode_text("hello"));
    }
}
