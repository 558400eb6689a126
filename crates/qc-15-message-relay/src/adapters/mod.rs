//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports. Used by the
//! `qc-15-relay` binary and as test doubles.

mod event_log;
mod native_vault;
mod router;
mod token_ledger;

pub use event_log::InMemoryEventLog;
pub use native_vault::InMemoryNativeVault;
pub use router::{InMemoryRouter, SentMessage};
pub use token_ledger::{Approval, InMemoryTokenLedger};
