//! Erlang port bridge for MIDI command streams.
//!
//! A host runtime launches the bridge as a port program and talks to it over
//! stdin/stdout: newline-delimited frames, each carrying one term in the
//! external term format (optionally hex-wrapped). Every `{Directive, Payload}`
//! message is routed to a command reply, a MIDI collaborator, or a log line.
//!
//! # Crate Structure
//!
//! - [`frame`]: delimiter framing and payload encoding
//! - [`term`]: term model with external-term-format decode/encode
//! - [`bridge`]: message extraction, dispatch, replies and the port loop

/// Re-export frame types.
pub mod frame {
    pub use midiport_frame::*;
}

/// Re-export term types.
pub mod term {
    pub use midiport_term::*;
}

/// Re-export bridge types.
pub mod bridge {
    pub use midiport_bridge::*;
}
