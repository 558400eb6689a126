//! # Algorithms Module
//!
//! Payload encoding and envelope construction.

pub mod codec;

pub use codec::{build_envelope, decode_envelope, decode_text, encode_text};
