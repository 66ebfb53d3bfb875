use std::collections::HashMap;
use std::sync::Arc;

use crate::collaborator::{CommandHandler, Discard, ExampleRunner, MidiSink};
use crate::error::MessageError;
use crate::events::{EventSink, PortEvent, TracingEvents};
use crate::message::{Directive, Message};
use crate::shutdown::Shutdown;

/// Command verb: liveness check, answered with `pong`.
pub const PING: &str = "ping";
/// Command verb: run the example collaborator, answered with `ok`.
pub const EXAMPLE: &str = "example";
/// Command verb: wait for the shutdown signal, then end the loop silently.
pub const STOP: &str = "stop";

/// Error text sent back for verbs nobody handles.
pub const UNSUPPORTED_COMMAND_REPLY: &str = "Received unsupported command";

/// Wire-level answer to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Sent as `{result, Value}`.
    Result(String),
    /// Sent as `{error, Value}`.
    Error(String),
}

impl Reply {
    pub fn result(value: impl Into<String>) -> Self {
        Reply::Result(value.into())
    }

    pub fn error(value: impl Into<String>) -> Self {
        Reply::Error(value.into())
    }
}

/// What to send back for one processed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Respond(Reply),
    /// Keep reading without writing anything.
    NoResponse,
}

/// Result of handling one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Emit the outcome (if any) and read the next frame.
    Continue(Outcome),
    /// End the loop without a reply.
    Exit,
}

impl Step {
    pub(crate) fn respond(reply: Reply) -> Self {
        Step::Continue(Outcome::Respond(reply))
    }

    pub(crate) fn silent() -> Self {
        Step::Continue(Outcome::NoResponse)
    }
}

/// Routes messages to replies and collaborator calls.
///
/// Holds no per-message state: dispatching the same message twice gives the
/// same step.
pub struct Dispatcher {
    midi: Arc<dyn MidiSink>,
    example: Arc<dyn ExampleRunner>,
    extensions: HashMap<String, Arc<dyn CommandHandler>>,
    events: Arc<dyn EventSink>,
    shutdown: Shutdown,
}

impl Dispatcher {
    /// A dispatcher with no-op collaborators that logs through `tracing`.
    pub fn new(shutdown: Shutdown) -> Self {
        Self {
            midi: Arc::new(Discard),
            example: Arc::new(Discard),
            extensions: HashMap::new(),
            events: Arc::new(TracingEvents),
            shutdown,
        }
    }

    pub fn with_midi(mut self, midi: impl MidiSink + 'static) -> Self {
        self.midi = Arc::new(midi);
        self
    }

    pub fn with_example(mut self, example: impl ExampleRunner + 'static) -> Self {
        self.example = Arc::new(example);
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Answer `verb` with `handler`.
    ///
    /// Built-in verbs (`ping`, `example`, `stop`) always win over a
    /// registered handler of the same name.
    pub fn register(
        mut self,
        verb: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) -> Self {
        self.extensions.insert(verb.into(), Arc::new(handler));
        self
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    pub fn events(&self) -> &dyn EventSink {
        self.events.as_ref()
    }

    /// Classify a message and run the matching branch.
    pub fn dispatch(&self, message: &Message) -> Step {
        self.events.record(&PortEvent::MessageReceived { message });

        match message.classify() {
            Directive::Command => match message.command() {
                Ok(verb) => self.command(verb),
                Err(error) => {
                    self.events.record(&PortEvent::CommandRejected { error: &error });
                    Step::silent()
                }
            },
            Directive::Midi => self.midi(message),
            Directive::Unknown => {
                self.events.record(&PortEvent::UnknownDirective {
                    directive: message.directive(),
                });
                Step::silent()
            }
        }
    }

    fn command(&self, verb: &str) -> Step {
        match verb {
            PING => Step::respond(Reply::result("pong")),
            EXAMPLE => {
                // The host is told the routine ran; a failure is only logged.
                if let Err(error) = self.example.run() {
                    self.events.record(&PortEvent::CollaboratorFailed {
                        collaborator: EXAMPLE,
                        error: &error,
                    });
                }
                Step::respond(Reply::result("ok"))
            }
            STOP => {
                self.events.record(&PortEvent::StopRequested);
                self.shutdown.wait();
                self.events.record(&PortEvent::ShutdownSignalled);
                Step::Exit
            }
            other => match self.extensions.get(other) {
                Some(handler) => Step::respond(handler.handle(other)),
                None => {
                    let error = MessageError::UnsupportedCommand {
                        verb: other.to_owned(),
                    };
                    self.events.record(&PortEvent::CommandRejected { error: &error });
                    Step::respond(Reply::error(UNSUPPORTED_COMMAND_REPLY))
                }
            },
        }
    }

    fn midi(&self, message: &Message) -> Step {
        if let Err(error) = self.midi.forward(message.payload()) {
            self.events.record(&PortEvent::CollaboratorFailed {
                collaborator: "midi",
                error: &error,
            });
        }
        Step::silent()
    }
}
