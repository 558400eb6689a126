//! # Domain Entities
//!
//! Envelopes, received-message state and audit events for the relay.

use super::errors::{Address, MessageId};
use super::value_objects::{ChainSelector, ExtraArgs, TokenAmount};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Message handed to the router for delivery.
///
/// Built fresh for every send and never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEnvelope {
    /// Receiver contract on the destination chain.
    pub receiver: Address,
    /// Encoded payload.
    pub data: Vec<u8>,
    /// Tokens moved with the message. Always empty for this relay.
    pub token_amounts: Vec<TokenAmount>,
    /// Execution hints for the destination chain.
    pub extra_args: ExtraArgs,
    /// Token the router fee is paid in.
    pub fee_token: Address,
}

/// Message delivered by the router from a source chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEnvelope {
    /// Router-assigned message identifier.
    pub message_id: MessageId,
    /// Chain the message originated from.
    pub source_chain: ChainSelector,
    /// Sender contract on the source chain.
    pub sender: Address,
    /// Encoded payload.
    pub data: Vec<u8>,
    /// Tokens that travelled with the message.
    pub token_amounts: Vec<TokenAmount>,
}

impl InboundEnvelope {
    /// First accompanying token transfer, if any.
    pub fn first_token_amount(&self) -> Option<&TokenAmount> {
        self.token_amounts.first()
    }
}

/// Most recently accepted inbound message.
///
/// Overwritten on every accepted message; no history is kept. The default
/// value (zero id, empty text) is the state before anything was received.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedState {
    /// Identifier of the last accepted message.
    pub last_message_id: MessageId,
    /// Decoded text of the last accepted message.
    pub last_text: String,
}

impl ReceivedState {
    /// True if nothing has been received yet.
    pub fn is_empty(&self) -> bool {
        self.last_message_id == [0u8; 32] && self.last_text.is_empty()
    }
}

/// Audit event emitted by the relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum RelayEvent {
    /// Outbound message accepted by the router.
    MessageSent {
        /// Router-assigned identifier.
        message_id: MessageId,
        /// Destination chain.
        destination_chain: ChainSelector,
        /// Receiver on the destination chain.
        receiver: Address,
        /// Text that was sent.
        text: String,
        /// Token the fee was paid in.
        fee_token: Address,
        /// Fee quoted and paid for this send.
        fee: U256,
    },
    /// Inbound message accepted from the router.
    MessageReceived {
        /// Router-assigned identifier.
        message_id: MessageId,
        /// Source chain.
        source_chain: ChainSelector,
        /// Sender on the source chain.
        sender: Address,
        /// Decoded text.
        text: String,
        /// First accompanying token, if any.
        token: Option<Address>,
        /// Amount of the first accompanying token, if any.
        amount: Option<U256>,
    },
    /// Destination whitelist entry changed.
    WhitelistUpdated {
        /// Destination chain.
        destination_chain: ChainSelector,
        /// New status.
        whitelisted: bool,
    },
    /// Principal proposed a new owner.
    OwnershipTransferRequested {
        /// Current owner.
        from: Address,
        /// Proposed owner.
        to: Address,
    },
    /// Pending owner accepted ownership.
    OwnershipTransferred {
        /// Previous owner.
        from: Address,
        /// New owner.
        to: Address,
    },
    /// Native balance swept to a beneficiary.
    NativeSwept {
        /// Recipient.
        beneficiary: Address,
        /// Amount moved.
        amount: U256,
    },
    /// Token balance swept to a beneficiary.
    TokenSwept {
        /// Recipient.
        beneficiary: Address,
        /// Token swept.
        token: Address,
        /// Amount moved.
        amount: U256,
    },
}

/// Operational counters for the relay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RelayStats {
    /// Messages accepted by the router.
    pub messages_sent: u64,
    /// Inbound messages accepted.
    pub messages_received: u64,
    /// Sum of fees paid across all sends.
    pub fees_paid: U256,
    /// Sends rejected before reaching the router.
    pub rejected_sends: u64,
    /// Inbound deliveries rejected.
    pub rejected_receives: u64,
}
