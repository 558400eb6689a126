//! # Destination Whitelist
//!
//! Per-destination authorization table gating every outbound send.
//! Absent entries read as not whitelisted. Entries never expire.

use super::value_objects::ChainSelector;
use std::collections::HashMap;

/// Whitelist of destination chains.
#[derive(Clone, Debug, Default)]
pub struct WhitelistGate {
    entries: HashMap<ChainSelector, bool>,
}

impl WhitelistGate {
    /// Create an empty whitelist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status of a destination. Returns the previous status.
    pub fn set(&mut self, chain: ChainSelector, whitelisted: bool) -> bool {
        self.entries.insert(chain, whitelisted).unwrap_or(false)
    }

    /// Check whether a destination is whitelisted.
    pub fn is_whitelisted(&self, chain: ChainSelector) -> bool {
        self.entries.get(&chain).copied().unwrap_or(false)
    }

    /// Destinations currently whitelisted.
    pub fn whitelisted(&self) -> impl Iterator<Item = ChainSelector> + '_ {
        self.entries
            .iter()
            .filter(|(_, allowed)| **allowed)
            .map(|(chain, _)| *chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unknown_destination_is_denied() {
        let gate = WhitelistGate::new();
        assert!(!gate.is_whitelisted(ChainSelector(1)));
    }

    #[test]
    fn test_set_returns_previous_status() {
        let mut gate = WhitelistGate::new();
        assert!(!gate.set(ChainSelector(1), true));
        assert!(gate.set(ChainSelector(1), false));
    }

    #[test]
    fn test_entries_are_independent() {
        let mut gate = WhitelistGate::new();
        gate.set(ChainSelector(1), true);
        gate.set(ChainSelector(2), false);

        assert!(gate.is_whitelisted(ChainSelector(1)));
        assert!(!gate.is_whitelisted(ChainSelector(2)));
        assert_eq!(gate.whitelisted().collect::<Vec<_>>(), vec![ChainSelector(1)]);
    }

    proptest! {
        #[test]
        fn prop_toggle_round_trip(selector in any::<u64>(), toggles in proptest::collection::vec(any::<bool>(), 1..8)) {
            let mut gate = WhitelistGate::new();
            let chain = ChainSelector(selector);
            for status in toggles {
                gate.set(chain, status);
                prop_assert_eq!(gate.is_whitelisted(chain), status);
            }
        }
    }
}
