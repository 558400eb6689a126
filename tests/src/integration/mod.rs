//! # Integration Tests
//!
//! Two relays wired through in-memory routers, one per chain.

pub mod relay_flows;
