use std::borrow::Cow;

use bytes::Bytes;
use midiport_frame::{Frame, PayloadEncoding};
use midiport_term::{encode, Term, TermEncodeError};

use crate::dispatch::{Outcome, Reply};

/// Tag atom of a successful reply.
pub const RESULT_TAG: &str = "result";
/// Tag atom of a failed reply.
pub const ERROR_TAG: &str = "error";

/// The `{Tag, <<Value>>}` term for a reply.
pub fn reply_term(reply: &Reply) -> Term {
    let (tag, value) = match reply {
        Reply::Result(value) => (RESULT_TAG, value),
        Reply::Error(value) => (ERROR_TAG, value),
    };
    Term::tuple([
        Term::atom(tag),
        Term::binary(Bytes::copy_from_slice(value.as_bytes())),
    ])
}

/// Encode an outcome as the frame to write, if any.
///
/// `NoResponse` yields `None`; replies are encoded and then wrapped for the
/// channel's payload encoding.
pub fn encode_outcome(
    outcome: &Outcome,
    encoding: PayloadEncoding,
) -> Result<Option<Frame>, TermEncodeError> {
    let reply = match outcome {
        Outcome::Respond(reply) => reply,
        Outcome::NoResponse => return Ok(None),
    };
    let bytes = encode(&reply_term(reply))?;
    let payload = match encoding.wrap(&bytes) {
        Cow::Borrowed(_) => bytes.clone(),
        Cow::Owned(wrapped) => Bytes::from(wrapped),
    };
    Ok(Some(Frame::new(payload)))
}
