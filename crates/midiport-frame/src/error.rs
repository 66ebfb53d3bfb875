/// Errors that can occur while reading or writing frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Zero bytes were read before any delimiter: the host closed the channel.
    #[error("channel closed (read zero bytes)")]
    Empty,

    /// The channel reached EOF in the middle of a frame.
    #[error("channel closed mid-frame ({len} bytes without delimiter)")]
    Incomplete { len: usize },

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// Whether the error means the peer is gone and no further frames will arrive.
    pub fn is_closed(&self) -> bool {
        matches!(self, FrameError::Empty)
    }
}

/// Errors produced when unwrapping a hex-encoded payload.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Hex text must contain an even number of digits.
    #[error("hex payload has odd length ({len})")]
    OddLength { len: usize },

    /// A byte outside `[0-9a-fA-F]` was found.
    #[error("invalid hex character {c:?} at index {index}")]
    InvalidHexCharacter { c: char, index: usize },
}

impl DecodeError {
    pub(crate) fn from_hex(err: hex::FromHexError, len: usize) -> Self {
        match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                DecodeError::InvalidHexCharacter { c, index }
            }
            hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
                DecodeError::OddLength { len }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
