//! # Domain Errors
//!
//! Error types for the Cross-Chain Message Relay.
//!
//! Every variant aborts the whole operation. Side effects (spend
//! authorization, state mutation, event emission) only happen after all
//! preconditions have passed.

use super::value_objects::ChainSelector;
use primitive_types::U256;
use thiserror::Error;

/// Hash type (32-byte).
pub type Hash = [u8; 32];

/// Address type (20-byte).
pub type Address = [u8; 20];

/// Cross-chain message identifier assigned by the router.
pub type MessageId = Hash;

/// Relay error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    /// Restricted operation invoked by someone other than the principal.
    #[error("Unauthorized caller: 0x{}", hex::encode(.caller))]
    Unauthorized {
        /// Caller that was rejected.
        caller: Address,
    },

    /// Destination chain is not on the whitelist.
    #[error("Destination chain not whitelisted: {0}")]
    DestinationNotWhitelisted(ChainSelector),

    /// Fee-token balance does not cover the quoted fee.
    #[error("Insufficient fee balance: have {balance}, need {required}")]
    InsufficientBalance {
        /// Current fee-token balance of the relay.
        balance: U256,
        /// Fee quoted by the router for this send.
        required: U256,
    },

    /// Router rejected the quote or the send.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// Inbound payload does not match the single-string shape.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Sweep requested on an empty balance.
    #[error("Nothing to withdraw")]
    NothingToWithdraw,

    /// Native transfer rejected by the beneficiary.
    #[error(
        "Native transfer of {amount} from 0x{} to 0x{} failed",
        hex::encode(.caller),
        hex::encode(.beneficiary)
    )]
    TransferFailed {
        /// Principal that requested the sweep.
        caller: Address,
        /// Intended recipient.
        beneficiary: Address,
        /// Amount that could not be moved.
        amount: U256,
    },

    /// Inbound delivery from someone other than the designated router.
    #[error("Invalid router: 0x{}", hex::encode(.caller))]
    InvalidRouter {
        /// Caller that attempted delivery.
        caller: Address,
    },

    /// Fee-token ledger rejected an operation.
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Ownership acceptance by someone other than the pending owner.
    #[error("Caller 0x{} is not the pending owner", hex::encode(.caller))]
    NotPendingOwner {
        /// Caller that attempted to accept.
        caller: Address,
    },

    /// Ownership transfer to the current owner.
    #[error("Cannot transfer ownership to self")]
    SelfTransfer,
}

/// Inbound payload decoding failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload shorter than the head (offset + length words).
    #[error("payload too short: {len} bytes")]
    TooShort {
        /// Payload length.
        len: usize,
    },

    /// Head offset does not point at the string tail.
    #[error("unexpected string offset: {0}")]
    BadOffset(U256),

    /// Declared length runs past the end of the payload.
    #[error("declared length {declared} exceeds available {available} bytes")]
    LengthOverflow {
        /// Length declared in the payload.
        declared: U256,
        /// Bytes actually present after the head.
        available: usize,
    },

    /// Padding after the string is not zeroed or not word aligned.
    #[error("malformed padding")]
    BadPadding,

    /// String bytes are not valid UTF-8.
    #[error("invalid utf-8 in text field")]
    InvalidUtf8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_balance_error_carries_fields() {
        let err = RelayError::InsufficientBalance {
            balance: U256::from(2),
            required: U256::from(3),
        };
        assert!(err.to_string().contains("have 2, need 3"));
    }

    #[test]
    fn test_not_whitelisted_error() {
        let err = RelayError::DestinationNotWhitelisted(ChainSelector(16015286601757825753));
        assert!(err.to_string().contains("16015286601757825753"));
    }

    #[test]
    fn test_unauthorized_error_hex_caller() {
        let err = RelayError::Unauthorized { caller: [0xABu8; 20] };
        assert!(err.to_string().contains("0xabab"));
    }

    #[test]
    fn test_decode_error_converts() {
        let err: RelayError = DecodeError::InvalidUtf8.into();
        assert!(matches!(err, RelayError::Decode(DecodeError::InvalidUtf8)));
    }
}
