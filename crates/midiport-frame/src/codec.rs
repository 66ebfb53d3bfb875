use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Packet terminator on both directions of the channel.
pub const DELIMITER: u8 = b'\n';

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// One delimiter-terminated packet read from the channel.
///
/// The payload never includes the trailing delimiter; `raw_len` is the number
/// of bytes the packet occupied on the wire, so `len() == raw_len() - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    payload: Bytes,
    raw_len: usize,
}

impl Frame {
    /// Build a frame from an already-trimmed payload.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        let payload = payload.into();
        let raw_len = payload.len() + 1;
        Self { payload, raw_len }
    }

    /// The delimiter-stripped payload.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Length of the trimmed payload.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Length of the frame on the wire, delimiter included.
    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}

/// Encode a payload into the wire format (payload followed by [`DELIMITER`]).
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) {
    if payload.contains(&DELIMITER) {
        tracing::warn!(
            len = payload.len(),
            "outgoing payload contains the frame delimiter; peer will see a split packet"
        );
    }
    dst.reserve(payload.len() + 1);
    dst.put_slice(payload);
    dst.put_u8(DELIMITER);
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a delimiter yet.
/// On success, consumes the frame bytes (delimiter included) from the buffer.
/// An oversized payload is reported without consuming anything; the caller
/// decides how to resynchronize.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Frame>> {
    let Some(pos) = find_delimiter(src, 0) else {
        check_unterminated(src.len(), max_payload)?;
        return Ok(None); // Need more data
    };
    take_frame(src, pos, max_payload).map(Some)
}

/// Position of the first delimiter at or after `from`.
pub(crate) fn find_delimiter(src: &[u8], from: usize) -> Option<usize> {
    src.get(from..)?
        .iter()
        .position(|&b| b == DELIMITER)
        .map(|offset| from + offset)
}

/// Fail once buffered bytes without a delimiter already exceed the limit.
pub(crate) fn check_unterminated(buffered: usize, max_payload: usize) -> Result<()> {
    if buffered > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: buffered,
            max: max_payload,
        });
    }
    Ok(())
}

/// Split off the frame whose delimiter sits at `pos`.
pub(crate) fn take_frame(src: &mut BytesMut, pos: usize, max_payload: usize) -> Result<Frame> {
    if pos > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: pos,
            max: max_payload,
        });
    }

    let mut raw = src.split_to(pos + 1);
    let raw_len = raw.len();
    raw.truncate(pos);

    Ok(Frame {
        payload: raw.freeze(),
        raw_len,
    })
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 16 MiB.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}
