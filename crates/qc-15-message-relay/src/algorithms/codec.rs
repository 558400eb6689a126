//! # Message Codec
//!
//! Builds outbound envelopes and decodes inbound payloads.
//!
//! The payload is a single string in the 32-byte word layout used by the
//! router network:
//!
//! ```text
//! [0..32)    offset of the string tail (always 0x20)
//! [32..64)   string length in bytes
//! [64..)     UTF-8 bytes, zero-padded to a multiple of 32
//! ```

use crate::domain::{Address, DecodeError, ExtraArgs, InboundEnvelope, OutboundEnvelope};
use primitive_types::U256;

/// Size of one encoding word.
pub const WORD: usize = 32;

/// Offset of the string tail for a single-string payload.
const STRING_OFFSET: u64 = 0x20;

fn word(value: U256) -> [u8; WORD] {
    let mut out = [0u8; WORD];
    value.to_big_endian(&mut out);
    out
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

/// Encode a text value as a single-string payload.
pub fn encode_text(text: &str) -> Vec<u8> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(2 * WORD + padded_len(bytes.len()));
    out.extend_from_slice(&word(U256::from(STRING_OFFSET)));
    out.extend_from_slice(&word(U256::from(bytes.len())));
    out.extend_from_slice(bytes);
    out.resize(2 * WORD + padded_len(bytes.len()), 0);
    out
}

/// Decode a single-string payload.
pub fn decode_text(data: &[u8]) -> Result<String, DecodeError> {
    if data.len() < 2 * WORD {
        return Err(DecodeError::TooShort { len: data.len() });
    }

    let offset = U256::from_big_endian(&data[..WORD]);
    if offset != U256::from(STRING_OFFSET) {
        return Err(DecodeError::BadOffset(offset));
    }

    let declared = U256::from_big_endian(&data[WORD..2 * WORD]);
    let tail = &data[2 * WORD..];
    if declared > U256::from(tail.len()) {
        return Err(DecodeError::LengthOverflow {
            declared,
            available: tail.len(),
        });
    }

    // bounded by tail.len() above
    let len = declared.as_usize();
    if tail.len() != padded_len(len) || tail[len..].iter().any(|b| *b != 0) {
        return Err(DecodeError::BadPadding);
    }

    String::from_utf8(tail[..len].to_vec()).map_err(|_| DecodeError::InvalidUtf8)
}

/// Build the outbound envelope for a send.
///
/// Data-only: the token-transfer list is always empty, and the execution
/// hints are always the default gas ceiling with non-strict ordering.
pub fn build_envelope(receiver: Address, data: Vec<u8>, fee_token: Address) -> OutboundEnvelope {
    OutboundEnvelope {
        receiver,
        data,
        token_amounts: Vec::new(),
        extra_args: ExtraArgs::default(),
        fee_token,
    }
}

/// Decode the text carried by an inbound envelope.
pub fn decode_envelope(envelope: &InboundEnvelope) -> Result<String, DecodeError> {
    decode_text(&envelope.data)
}
