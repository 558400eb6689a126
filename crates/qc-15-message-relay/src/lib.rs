//! # QC-15 Cross-Chain Message Relay
//!
//! Sends text messages to whitelisted destination chains through a router,
//! paying the router fee in a designated token, and accepts inbound
//! messages from that router.
//!
//! **Subsystem ID:** 15
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Guarantees
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | Whitelist gate | Checked before any fee quote |
//! | Fee coverage | Balance checked after quote, before spend authorization |
//! | Trusted router | Inbound delivery only from the configured router |
//! | Atomic accept | Malformed payloads never touch the received state |
//!
//! ## Module Structure
//!
//! ```text
//! qc-15-message-relay/
//! ├── domain/          # Envelopes, whitelist, errors, invariants
//! ├── algorithms/      # Payload codec
//! ├── ports/           # MessageRelayApi, Router, TokenLedger, NativeVault
//! ├── adapters/        # In-memory port implementations
//! ├── service/         # Dispatcher, Receiver, admin accounting
//! └── config.rs        # RelayConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    Approval, InMemoryEventLog, InMemoryNativeVault, InMemoryRouter, InMemoryTokenLedger,
    SentMessage,
};
pub use algorithms::{build_envelope, decode_envelope, decode_text, encode_text};
pub use config::{ConfigError, RelayConfig};
pub use domain::{
    Address, ChainSelector, DecodeError, ExtraArgs, Hash, InboundEnvelope, MessageId,
    OutboundEnvelope, ReceivedState, RelayError, RelayEvent, RelayStats, TokenAmount,
    WhitelistGate, DEFAULT_GAS_LIMIT,
};
pub use ports::{EventPublisher, MessageRelayApi, NativeVault, Router, TokenLedger};
pub use primitive_types::U256;
pub use service::{MessageRelayService, Receiver};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
