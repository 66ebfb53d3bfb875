/// Errors produced while decoding the external term format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermDecodeError {
    /// The buffer holds no bytes at all.
    #[error("empty term buffer")]
    Empty,

    /// The leading byte is not the format version marker.
    #[error("bad version marker {0} (expected 131)")]
    BadVersion(u8),

    /// A tag byte this decoder does not understand.
    #[error("unknown term tag {0}")]
    UnknownTag(u8),

    /// The buffer ended before a value was complete.
    #[error("truncated term: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// An atom declared as UTF-8 is not valid UTF-8.
    #[error("atom is not valid UTF-8")]
    InvalidUtf8,

    /// A big integer does not fit in 64 bits.
    #[error("integer does not fit in i64")]
    IntegerOverflow,

    /// A legacy float string could not be parsed.
    #[error("invalid float text")]
    InvalidFloat,

    /// Bytes were left over after the top-level term.
    #[error("{0} trailing bytes after term")]
    TrailingBytes(usize),

    /// Nesting exceeded the decoder's recursion limit.
    #[error("term nesting deeper than {0}")]
    DepthExceeded(usize),
}

/// Errors produced while encoding a term.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermEncodeError {
    /// Atoms are limited to 255 characters.
    #[error("atom too long ({len} characters, max 255)")]
    AtomTooLong { len: usize },

    /// `STRING_EXT` holds at most 65535 bytes.
    #[error("string too long ({len} bytes, max 65535)")]
    StringTooLong { len: usize },

    /// Tuple, list and binary lengths are 32-bit on the wire.
    #[error("sequence too long ({len} elements)")]
    SequenceTooLong { len: usize },

    /// Nesting exceeded what the decoder accepts.
    #[error("term nesting deeper than {0}")]
    DepthExceeded(usize),
}
