//! Newline-delimited packet framing for port channels.
//!
//! A host runtime talks to the bridge over a pair of byte streams. Every
//! packet on either stream is terminated by a single `0x0A` byte:
//!
//! ```text
//! ┌──────────────────────────────┬──────┐
//! │ Payload (raw or hex text)    │ 0x0A │
//! └──────────────────────────────┴──────┘
//! ```
//!
//! Some intermediaries between the host and this process mangle raw binary
//! packets, so the payload may optionally travel as ASCII hex text
//! (see [`PayloadEncoding`]).

pub mod codec;
pub mod encoding;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{decode_frame, encode_frame, Frame, FrameConfig, DEFAULT_MAX_PAYLOAD, DELIMITER};
pub use encoding::{hex_decode, hex_encode, PayloadEncoding};
pub use error::{DecodeError, FrameError, Result};
pub use reader::FrameReader;
pub use writer::{FrameWriter, SharedFrameWriter};
