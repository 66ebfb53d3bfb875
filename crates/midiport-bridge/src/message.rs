use midiport_term::Term;

use crate::error::{FormatError, MessageError};

/// Directive atom for control commands.
pub const COMMAND_DIRECTIVE: &str = "command";
/// Directive atom for MIDI traffic.
pub const MIDI_DIRECTIVE: &str = "midi";

const MESSAGE_ARITY: usize = 2;

/// Classification of a message by its directive atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Command,
    Midi,
    Unknown,
}

/// A `{Directive, Payload}` pair taken from a decoded term.
///
/// The payload is carried untouched; only the branch matching the directive
/// looks inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    directive: String,
    payload: Term,
}

impl Message {
    /// Split a decoded term into directive and payload.
    ///
    /// The term must be a 2-tuple whose first element is an atom.
    pub fn extract(term: Term) -> Result<Self, FormatError> {
        let elements = match term {
            Term::Tuple(elements) => elements,
            other => {
                return Err(FormatError::NotATuple {
                    found: other.kind(),
                })
            }
        };

        let [directive, payload]: [Term; MESSAGE_ARITY] =
            elements
                .try_into()
                .map_err(|elements: Vec<Term>| FormatError::WrongArity {
                    expected: MESSAGE_ARITY,
                    found: elements.len(),
                })?;

        match directive {
            Term::Atom(directive) => Ok(Self { directive, payload }),
            other => Err(FormatError::DirectiveNotAtom {
                found: other.kind(),
            }),
        }
    }

    pub fn new(directive: impl Into<String>, payload: Term) -> Self {
        Self {
            directive: directive.into(),
            payload,
        }
    }

    pub fn directive(&self) -> &str {
        &self.directive
    }

    pub fn payload(&self) -> &Term {
        &self.payload
    }

    pub fn into_payload(self) -> Term {
        self.payload
    }

    pub fn classify(&self) -> Directive {
        match self.directive.as_str() {
            COMMAND_DIRECTIVE => Directive::Command,
            MIDI_DIRECTIVE => Directive::Midi,
            _ => Directive::Unknown,
        }
    }

    pub fn is_command(&self) -> bool {
        self.classify() == Directive::Command
    }

    pub fn is_midi(&self) -> bool {
        self.classify() == Directive::Midi
    }

    /// The command verb of a `{command, Verb}` message.
    pub fn command(&self) -> Result<&str, MessageError> {
        if !self.is_command() {
            return Err(MessageError::NotACommand {
                directive: self.directive.clone(),
            });
        }
        self.payload
            .as_atom()
            .ok_or_else(|| MessageError::CommandNotAtom {
                found: self.payload.kind(),
            })
    }

    /// Rebuild the wire term for this message.
    pub fn to_term(&self) -> Term {
        Term::tuple([Term::Atom(self.directive.clone()), self.payload.clone()])
    }
}
