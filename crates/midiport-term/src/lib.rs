//! Term model and external term format codec.
//!
//! Messages exchanged with the host runtime are serialized in the external
//! term format: a version byte (`131`) followed by one recursively tagged
//! value. [`decode`] turns such a buffer into a [`Term`] tree and [`encode`]
//! is its structural inverse.

pub mod decode;
pub mod encode;
pub mod error;
pub mod tag;
pub mod term;

pub use decode::{decode, MAX_DEPTH};
pub use encode::{encode, encode_into};
pub use error::{TermDecodeError, TermEncodeError};
pub use term::Term;
