use midiport_frame::{DecodeError, FrameError};
use midiport_term::{TermDecodeError, TermEncodeError};

/// A decoded term that is not a `{Directive, Payload}` pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The top-level term is not a tuple.
    #[error("unexpected message format: expected tuple, got {found}")]
    NotATuple { found: &'static str },

    /// The tuple does not have exactly two elements.
    #[error("tuple of wrong size; expected {expected}, got {found}")]
    WrongArity { expected: usize, found: usize },

    /// The first element is not an atom.
    #[error("unexpected type for directive: expected atom, got {found}")]
    DirectiveNotAtom { found: &'static str },
}

/// Errors raised while interpreting a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error(transparent)]
    Format(#[from] FormatError),

    /// `command()` was called on a message whose directive is not `command`.
    #[error("directive {directive:?} is not a command")]
    NotACommand { directive: String },

    /// A `command` message whose payload is not an atom.
    #[error("could not extract command atom from {found} payload")]
    CommandNotAtom { found: &'static str },

    /// The command atom names no known verb.
    #[error("unsupported command {verb:?}")]
    UnsupportedCommand { verb: String },
}

/// Everything that can go wrong while servicing the port.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Framing or channel I/O failure.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// The payload is not valid hex text.
    #[error("problem unwrapping packet: {0}")]
    Decode(#[from] DecodeError),

    /// The payload is not a valid encoded term.
    #[error("problem decoding term: {0}")]
    TermDecode(#[from] TermDecodeError),

    /// A reply could not be encoded.
    #[error("problem encoding term: {0}")]
    TermEncode(#[from] TermEncodeError),

    /// The term is not a usable message.
    #[error("message error: {0}")]
    Message(#[from] MessageError),
}

impl BridgeError {
    /// Whether the peer closed the input channel.
    pub fn is_channel_closed(&self) -> bool {
        matches!(self, BridgeError::Frame(err) if err.is_closed())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
