use std::borrow::Cow;

use crate::error::DecodeError;

/// How frame payloads are represented on the channel.
///
/// `Hex` exists for transports that drop or rewrite interior bytes of raw
/// binary packets: the same term bytes travel as ASCII hex digits, which no
/// intermediary interprets as control bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadEncoding {
    /// Payload bytes are the term bytes.
    #[default]
    Raw,
    /// Payload bytes are the term bytes as ASCII hex text.
    Hex,
}

impl PayloadEncoding {
    pub fn is_hex(self) -> bool {
        matches!(self, PayloadEncoding::Hex)
    }

    /// Recover the term bytes carried by a trimmed frame payload.
    pub fn unwrap(self, payload: &[u8]) -> Result<Cow<'_, [u8]>, DecodeError> {
        match self {
            PayloadEncoding::Raw => Ok(Cow::Borrowed(payload)),
            PayloadEncoding::Hex => {
                tracing::trace!(len = payload.len(), "unwrapping hex payload");
                hex_decode(payload).map(Cow::Owned)
            }
        }
    }

    /// Represent term bytes the way the peer expects to receive them.
    pub fn wrap(self, bytes: &[u8]) -> Cow<'_, [u8]> {
        match self {
            PayloadEncoding::Raw => Cow::Borrowed(bytes),
            PayloadEncoding::Hex => Cow::Owned(hex_encode(bytes)),
        }
    }
}

/// Decode ASCII hex text (either case) into bytes.
pub fn hex_decode(text: &[u8]) -> Result<Vec<u8>, DecodeError> {
    hex::decode(text).map_err(|err| DecodeError::from_hex(err, text.len()))
}

/// Encode bytes as lowercase ASCII hex text.
pub fn hex_encode(bytes: &[u8]) -> Vec<u8> {
    hex::encode(bytes).into_bytes()
}
