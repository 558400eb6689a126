//! # Dispatcher
//!
//! Outbound sends: whitelist gate, envelope, quote, balance check, spend
//! authorization, router send, audit event.
//!
//! Authorization and whitelist are checked before the router is asked for
//! a quote. The balance is checked after the quote and before any spend
//! authorization, so every rejection leaves no external side effect.

use super::MessageRelayService;
use crate::algorithms::{build_envelope, encode_text};
use crate::domain::{
    invariant_principal, invariant_sufficient_balance, invariant_whitelisted, Address,
    ChainSelector, MessageId, OutboundEnvelope, RelayError, RelayEvent,
};
use crate::ports::outbound::{EventPublisher, NativeVault, Router, TokenLedger};
use primitive_types::U256;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

impl<R, L, N, E> MessageRelayService<R, L, N, E>
where
    R: Router,
    L: TokenLedger,
    N: NativeVault,
    E: EventPublisher,
{
    fn envelope_for(&self, receiver: Address, text: &str) -> OutboundEnvelope {
        build_envelope(receiver, encode_text(text), self.config.fee_token)
    }

    pub(super) async fn quote(
        &self,
        destination: ChainSelector,
        receiver: Address,
        text: &str,
    ) -> Result<U256, RelayError> {
        let envelope = self.envelope_for(receiver, text);
        self.router.get_fee(destination, &envelope).await
    }

    /// Every failed send counts as a rejection, whether a precondition or
    /// the router refused it.
    #[instrument(skip_all, fields(correlation_id = %Uuid::new_v4(), destination = %destination))]
    pub(super) async fn dispatch(
        &mut self,
        caller: Address,
        destination: ChainSelector,
        receiver: Address,
        text: &str,
    ) -> Result<MessageId, RelayError> {
        let result = self.try_dispatch(caller, destination, receiver, text).await;
        if let Err(e) = &result {
            warn!(error = %e, "[qc-15] Send rejected");
            self.stats.rejected_sends += 1;
        }
        result
    }

    async fn try_dispatch(
        &mut self,
        caller: Address,
        destination: ChainSelector,
        receiver: Address,
        text: &str,
    ) -> Result<MessageId, RelayError> {
        invariant_principal(&caller, &self.owner)?;
        invariant_whitelisted(&self.whitelist, destination)?;

        let fee_token = self.config.fee_token;
        let relay = self.config.relay;
        let spender = self.config.router;

        let envelope = self.envelope_for(receiver, text);
        let fee = self.router.get_fee(destination, &envelope).await?;
        let balance = self.ledger.balance_of(fee_token, relay).await?;
        debug!(%fee, %balance, "[qc-15] Fee quoted");

        invariant_sufficient_balance(balance, fee)?;

        self.ledger.approve(fee_token, relay, spender, fee).await?;

        let message_id = match self.router.send(relay, destination, envelope).await {
            Ok(id) => id,
            Err(e) => {
                if let Err(revoke) = self
                    .ledger
                    .approve(fee_token, relay, spender, U256::zero())
                    .await
                {
                    error!(error = %revoke, "[qc-15] Failed to revoke router allowance");
                }
                return Err(e);
            }
        };

        self.stats.messages_sent += 1;
        self.stats.fees_paid = self.stats.fees_paid.saturating_add(fee);
        self.events.publish(RelayEvent::MessageSent {
            message_id,
            destination_chain: destination,
            receiver,
            text: text.to_string(),
            fee_token,
            fee,
        });

        info!(
            message_id = %hex::encode(message_id),
            %fee,
            "[qc-15] Message sent"
        );
        Ok(message_id)
    }
}
