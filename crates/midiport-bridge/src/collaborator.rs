//! Seams to the components that do the real work behind a message.
//!
//! The bridge only routes: device I/O, the example routine and any extra
//! command verbs live behind these traits and own whatever state they need.

use midiport_term::Term;

use crate::dispatch::Reply;

/// Failure reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CollaboratorError {
    message: String,
}

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Receives the payload of every `{midi, Payload}` message.
pub trait MidiSink: Send + Sync {
    fn forward(&self, payload: &Term) -> Result<(), CollaboratorError>;
}

/// Runs the canned example routine for the `example` command.
pub trait ExampleRunner: Send + Sync {
    fn run(&self) -> Result<(), CollaboratorError>;
}

/// Answers an externally registered command verb.
pub trait CommandHandler: Send + Sync {
    fn handle(&self, verb: &str) -> Reply;
}

impl<F> CommandHandler for F
where
    F: Fn(&str) -> Reply + Send + Sync,
{
    fn handle(&self, verb: &str) -> Reply {
        self(verb)
    }
}

/// Collaborator that accepts everything and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl MidiSink for Discard {
    fn forward(&self, _payload: &Term) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

impl ExampleRunner for Discard {
    fn run(&self) -> Result<(), CollaboratorError> {
        Ok(())
    }
}
