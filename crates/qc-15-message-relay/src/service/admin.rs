//! # Admin Accounting
//!
//! Principal-only operations: whitelist edits, balance sweeps and the
//! two-step ownership handover.

use super::MessageRelayService;
use crate::domain::{
    invariant_nonzero_balance, invariant_principal, Address, ChainSelector, RelayError,
    RelayEvent,
};
use crate::ports::outbound::{EventPublisher, NativeVault, Router, TokenLedger};
use primitive_types::U256;
use tracing::{info, warn};

impl<R, L, N, E> MessageRelayService<R, L, N, E>
where
    R: Router,
    L: TokenLedger,
    N: NativeVault,
    E: EventPublisher,
{
    fn require_principal(&self, caller: &Address) -> Result<(), RelayError> {
        invariant_principal(caller, &self.owner).inspect_err(|e| {
            warn!(error = %e, "[qc-15] Restricted operation rejected");
        })
    }

    pub(super) fn apply_whitelist(
        &mut self,
        caller: Address,
        destination: ChainSelector,
        whitelisted: bool,
    ) -> Result<(), RelayError> {
        self.require_principal(&caller)?;

        let previous = self.whitelist.set(destination, whitelisted);
        if previous != whitelisted {
            info!(%destination, whitelisted, "[qc-15] Destination whitelist updated");
        }
        self.events.publish(RelayEvent::WhitelistUpdated {
            destination_chain: destination,
            whitelisted,
        });
        Ok(())
    }

    pub(super) async fn sweep_native_balance(
        &mut self,
        caller: Address,
        beneficiary: Address,
    ) -> Result<U256, RelayError> {
        self.require_principal(&caller)?;

        let relay = self.config.relay;
        let amount = self.vault.balance_of(relay).await?;
        invariant_nonzero_balance(amount)?;

        if !self.vault.send_value(relay, beneficiary, amount).await? {
            return Err(RelayError::TransferFailed {
                caller,
                beneficiary,
                amount,
            });
        }

        self.events.publish(RelayEvent::NativeSwept {
            beneficiary,
            amount,
        });
        info!(%amount, "[qc-15] Native balance swept");
        Ok(amount)
    }

    pub(super) async fn sweep_token_balance(
        &mut self,
        caller: Address,
        beneficiary: Address,
        token: Address,
    ) -> Result<U256, RelayError> {
        self.require_principal(&caller)?;

        let relay = self.config.relay;
        let amount = self.ledger.balance_of(token, relay).await?;
        invariant_nonzero_balance(amount)?;

        self.ledger.transfer(token, relay, beneficiary, amount).await?;

        self.events.publish(RelayEvent::TokenSwept {
            beneficiary,
            token,
            amount,
        });
        info!(%amount, token = %hex::encode(token), "[qc-15] Token balance swept");
        Ok(amount)
    }

    pub(super) fn propose_owner(&mut self, caller: Address, to: Address) -> Result<(), RelayError> {
        self.require_principal(&caller)?;
        if to == caller {
            return Err(RelayError::SelfTransfer);
        }

        self.pending_owner = Some(to);
        self.events.publish(RelayEvent::OwnershipTransferRequested {
            from: self.owner,
            to,
        });
        Ok(())
    }

    pub(super) fn confirm_owner(&mut self, caller: Address) -> Result<(), RelayError> {
        if self.pending_owner != Some(caller) {
            return Err(RelayError::NotPendingOwner { caller });
        }

        let previous = std::mem::replace(&mut self.owner, caller);
        self.pending_owner = None;
        self.events.publish(RelayEvent::OwnershipTransferred {
            from: previous,
            to: caller,
        });
        info!(owner = %hex::encode(caller), "[qc-15] Ownership transferred");
        Ok(())
    }
}
