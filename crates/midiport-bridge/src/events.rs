//! Structured records of what the port loop did with each frame.
//!
//! Protocol code never logs directly; it reports [`PortEvent`]s to an
//! [`EventSink`]. [`TracingEvents`] forwards them to `tracing`.

use midiport_frame::FrameError;

use crate::collaborator::CollaboratorError;
use crate::dispatch::Reply;
use crate::error::{BridgeError, FormatError, MessageError};
use crate::message::Message;

#[derive(Debug)]
pub enum PortEvent<'a> {
    /// A complete frame arrived.
    FrameReceived { raw_len: usize },
    /// A frame was dropped by the framer (oversized or cut short by EOF).
    FrameRejected { error: &'a FrameError },
    /// The frame payload did not unwrap or decode into a term.
    PayloadRejected { error: &'a BridgeError },
    /// The term is not a `{Directive, Payload}` pair.
    MessageRejected { error: &'a FormatError },
    /// A message was extracted and is about to be dispatched.
    MessageReceived { message: &'a Message },
    /// The directive is neither `command` nor `midi`.
    UnknownDirective { directive: &'a str },
    /// A `command` message could not be turned into a verb, or the verb is unknown.
    CommandRejected { error: &'a MessageError },
    /// A collaborator reported a failure.
    CollaboratorFailed {
        collaborator: &'static str,
        error: &'a CollaboratorError,
    },
    /// A reply frame was written.
    ReplySent { reply: &'a Reply },
    /// `stop` arrived; the loop now waits on the shutdown signal.
    StopRequested,
    /// The shutdown signal fired.
    ShutdownSignalled,
    /// The host closed the input channel.
    ChannelClosed,
}

impl PortEvent<'_> {
    /// Stable name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            PortEvent::FrameReceived { .. } => "frame_received",
            PortEvent::FrameRejected { .. } => "frame_rejected",
            PortEvent::PayloadRejected { .. } => "payload_rejected",
            PortEvent::MessageRejected { .. } => "message_rejected",
            PortEvent::MessageReceived { .. } => "message_received",
            PortEvent::UnknownDirective { .. } => "unknown_directive",
            PortEvent::CommandRejected { .. } => "command_rejected",
            PortEvent::CollaboratorFailed { .. } => "collaborator_failed",
            PortEvent::ReplySent { .. } => "reply_sent",
            PortEvent::StopRequested => "stop_requested",
            PortEvent::ShutdownSignalled => "shutdown_signalled",
            PortEvent::ChannelClosed => "channel_closed",
        }
    }

    /// Whether the event describes a failure.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            PortEvent::FrameRejected { .. }
                | PortEvent::PayloadRejected { .. }
                | PortEvent::MessageRejected { .. }
                | PortEvent::UnknownDirective { .. }
                | PortEvent::CommandRejected { .. }
                | PortEvent::CollaboratorFailed { .. }
        )
    }
}

/// Consumer of port events.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &PortEvent<'_>);
}

/// Sink that turns events into `tracing` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEvents;

impl EventSink for TracingEvents {
    fn record(&self, event: &PortEvent<'_>) {
        let name = event.name();
        match event {
            PortEvent::FrameReceived { raw_len } => {
                tracing::debug!(event = name, raw_len, "frame received");
            }
            PortEvent::FrameRejected { error } => {
                tracing::error!(event = name, error = %error, "frame rejected");
            }
            PortEvent::PayloadRejected { error } => {
                tracing::error!(event = name, error = %error, "payload rejected");
            }
            PortEvent::MessageRejected { error } => {
                tracing::error!(event = name, error = %error, "message rejected");
            }
            PortEvent::MessageReceived { message } => {
                tracing::debug!(
                    event = name,
                    directive = message.directive(),
                    payload = %message.payload(),
                    "message received"
                );
            }
            PortEvent::UnknownDirective { directive } => {
                tracing::error!(event = name, directive, "unexpected message type");
            }
            PortEvent::CommandRejected { error } => {
                tracing::error!(event = name, error = %error, "command rejected");
            }
            PortEvent::CollaboratorFailed {
                collaborator,
                error,
            } => {
                tracing::warn!(event = name, collaborator, error = %error, "collaborator failed");
            }
            PortEvent::ReplySent { reply } => {
                tracing::debug!(event = name, reply = ?reply, "reply sent");
            }
            PortEvent::StopRequested => {
                tracing::info!(event = name, "stop requested; waiting for shutdown signal");
            }
            PortEvent::ShutdownSignalled => {
                tracing::info!(event = name, "shutdown signalled");
            }
            PortEvent::ChannelClosed => {
                tracing::info!(event = name, "host closed the port");
            }
        }
    }
}
