//! # Domain Invariants
//!
//! Business rules checked before any side effect of a relay operation.

use super::errors::{Address, RelayError};
use super::value_objects::ChainSelector;
use super::whitelist::WhitelistGate;
use primitive_types::U256;

/// Invariant: restricted operations are performed by the principal only.
pub fn invariant_principal(caller: &Address, owner: &Address) -> Result<(), RelayError> {
    if caller != owner {
        return Err(RelayError::Unauthorized { caller: *caller });
    }
    Ok(())
}

/// Invariant: a send only proceeds to a whitelisted destination.
pub fn invariant_whitelisted(
    gate: &WhitelistGate,
    destination: ChainSelector,
) -> Result<(), RelayError> {
    if !gate.is_whitelisted(destination) {
        return Err(RelayError::DestinationNotWhitelisted(destination));
    }
    Ok(())
}

/// Invariant: fee-token balance covers the quoted fee.
pub fn invariant_sufficient_balance(balance: U256, fee: U256) -> Result<(), RelayError> {
    if balance < fee {
        return Err(RelayError::InsufficientBalance {
            balance,
            required: fee,
        });
    }
    Ok(())
}

/// Invariant: inbound delivery comes from the designated router.
pub fn invariant_trusted_router(caller: &Address, router: &Address) -> Result<(), RelayError> {
    if caller != router {
        return Err(RelayError::InvalidRouter { caller: *caller });
    }
    Ok(())
}

/// Invariant: a sweep has something to move.
pub fn invariant_nonzero_balance(balance: U256) -> Result<(), RelayError> {
    if balance.is_zero() {
        return Err(RelayError::NothingToWithdraw);
    }
    Ok(())
}
