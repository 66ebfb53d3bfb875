//! Message extraction, dispatch and the read→dispatch→respond loop.
//!
//! Every frame is handled from a clean slate: its payload is unwrapped and
//! decoded into a [`Term`](midiport_term::Term), split into a
//! [`Message`] `{Directive, Payload}`, and routed by the [`Dispatcher`] to an
//! [`Outcome`]. Replies go back out as `{result, Value}` or `{error, Value}`.
//! Only a closed input channel (or a `stop` command followed by the shutdown
//! signal) ends the [`Port`] loop.

pub mod collaborator;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod message;
pub mod port;
pub mod response;
pub mod shutdown;

pub use collaborator::{CollaboratorError, CommandHandler, Discard, ExampleRunner, MidiSink};
pub use dispatch::{
    Dispatcher, Outcome, Reply, Step, EXAMPLE, PING, STOP, UNSUPPORTED_COMMAND_REPLY,
};
pub use error::{BridgeError, FormatError, MessageError, Result};
pub use events::{EventSink, PortEvent, TracingEvents};
pub use message::{Directive, Message, COMMAND_DIRECTIVE, MIDI_DIRECTIVE};
pub use port::{Port, PortConfig};
pub use response::{encode_outcome, reply_term, ERROR_TAG, RESULT_TAG};
pub use shutdown::Shutdown;
