//! # Receiver
//!
//! Accepts inbound messages from the trusted router and keeps the most
//! recently received one.

use super::MessageRelayService;
use crate::algorithms::decode_envelope;
use crate::domain::{
    invariant_trusted_router, Address, InboundEnvelope, ReceivedState, RelayError, RelayEvent,
};
use crate::ports::outbound::{EventPublisher, NativeVault, Router, TokenLedger};
use tracing::{info, instrument, warn};

/// Single writer of [`ReceivedState`].
#[derive(Clone, Debug)]
pub struct Receiver {
    /// Only caller allowed to deliver messages.
    router: Address,
    /// Last accepted message.
    state: ReceivedState,
}

impl Receiver {
    /// Create a receiver trusting `router`.
    pub fn new(router: Address) -> Self {
        Self {
            router,
            state: ReceivedState::default(),
        }
    }

    /// Validate and record an inbound message, returning its text.
    ///
    /// All checks run before the state is touched, so a rejected message
    /// leaves the previous state in place.
    pub fn accept(
        &mut self,
        caller: &Address,
        envelope: &InboundEnvelope,
    ) -> Result<String, RelayError> {
        invariant_trusted_router(caller, &self.router)?;
        let text = decode_envelope(envelope)?;

        self.state = ReceivedState {
            last_message_id: envelope.message_id,
            last_text: text.clone(),
        };
        Ok(text)
    }

    /// Last accepted message.
    pub fn state(&self) -> &ReceivedState {
        &self.state
    }
}

impl<R, L, N, E> MessageRelayService<R, L, N, E>
where
    R: Router,
    L: TokenLedger,
    N: NativeVault,
    E: EventPublisher,
{
    #[instrument(skip_all, fields(message_id = %hex::encode(envelope.message_id), source = %envelope.source_chain))]
    pub(super) fn accept_inbound(
        &mut self,
        caller: Address,
        envelope: InboundEnvelope,
    ) -> Result<(), RelayError> {
        let text = match self.receiver.accept(&caller, &envelope) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "[qc-15] Inbound message rejected");
                self.stats.rejected_receives += 1;
                return Err(e);
            }
        };

        let first = envelope.first_token_amount();
        self.events.publish(RelayEvent::MessageReceived {
            message_id: envelope.message_id,
            source_chain: envelope.source_chain,
            sender: envelope.sender,
            text,
            token: first.map(|t| t.token),
            amount: first.map(|t| t.amount),
        });
        self.stats.messages_received += 1;

        info!("[qc-15] Inbound message accepted");
        Ok(())
    }
}
