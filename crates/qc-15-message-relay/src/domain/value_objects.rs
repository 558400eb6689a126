//! # Domain Value Objects
//!
//! Immutable value types for the Cross-Chain Message Relay.

use super::errors::Address;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default gas ceiling for execution on the destination chain.
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// Opaque 64-bit chain selector assigned by the router network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainSelector(pub u64);

impl fmt::Display for ChainSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainSelector {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A token and amount travelling with a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    /// Token contract address.
    pub token: Address,
    /// Amount in the token's smallest unit.
    pub amount: U256,
}

impl TokenAmount {
    /// Create a new token amount.
    pub fn new(token: Address, amount: U256) -> Self {
        Self { token, amount }
    }
}

/// Execution hints attached to an outbound envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraArgs {
    /// Gas ceiling for the receiver's execution on the destination chain.
    pub gas_limit: u64,
    /// Whether the message must execute in sequence with earlier ones.
    pub strict_ordering: bool,
}

impl Default for ExtraArgs {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_GAS_LIMIT,
            strict_ordering: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_selector_display() {
        let selector = ChainSelector::from(16015286601757825753);
        assert_eq!(selector.to_string(), "16015286601757825753");
    }

    #[test]
    fn test_extra_args_default_is_non_strict() {
        let args = ExtraArgs::default();
        assert_eq!(args.gas_limit, 200_000);
        assert!(!args.strict_ordering);
    }

    #[test]
    fn test_chain_selector_serializes_as_number() {
        let json = serde_json::to_string(&ChainSelector(42)).unwrap();
        assert_eq!(json, "42");
    }
}
