//! Stand-ins for the MIDI engine that only record what they would play.

use midiport_bridge::{CollaboratorError, CommandHandler, ExampleRunner, MidiSink, Reply};
use midiport_term::Term;

pub const LIST_DEVICES: &str = "list-devices";
pub const PLAY_NOTE: &str = "play-note";

/// Operation names a MIDI payload may carry.
const KNOWN_OPS: &[&str] = &[
    "batch",
    "channel",
    "device",
    "meter",
    "note_on",
    "note_off",
    "tempo_bpm",
    "cc",
    "chord",
];

/// Logs every operation of a `{midi, Payload}` message.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMidi;

impl LoggingMidi {
    fn record(&self, op: &Term) {
        let (name, args) = match op.as_tuple() {
            Some([name, args]) => (name.as_atom(), Some(args)),
            _ => (op.as_atom(), None),
        };
        match name {
            Some(name) if KNOWN_OPS.contains(&name) => match args {
                Some(args) => tracing::debug!(op = name, args = %args, "midi op"),
                None => tracing::debug!(op = name, "midi op"),
            },
            _ => tracing::warn!(op = %op, "unrecognised midi op"),
        }
    }
}

impl MidiSink for LoggingMidi {
    fn forward(&self, payload: &Term) -> Result<(), CollaboratorError> {
        match payload {
            Term::List { elements, .. } => elements.iter().for_each(|op| self.record(op)),
            other => self.record(other),
        }
        Ok(())
    }
}

/// Logs a short arpeggio instead of sending it to a device.
#[derive(Debug, Clone)]
pub struct LoggingExample {
    notes: Vec<u8>,
    velocity: u8,
}

impl Default for LoggingExample {
    fn default() -> Self {
        Self {
            notes: vec![60, 64, 67, 72],
            velocity: 90,
        }
    }
}

impl ExampleRunner for LoggingExample {
    fn run(&self) -> Result<(), CollaboratorError> {
        if self.notes.is_empty() {
            return Err(CollaboratorError::new("example has no notes"));
        }
        for (step, note) in self.notes.iter().enumerate() {
            tracing::info!(step, note, velocity = self.velocity, "example note_on");
            tracing::info!(step, note, "example note_off");
        }
        Ok(())
    }
}

/// Answers the device verbs with no device engine attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingDevices;

impl CommandHandler for LoggingDevices {
    fn handle(&self, verb: &str) -> Reply {
        match verb {
            LIST_DEVICES => Reply::result("none"),
            PLAY_NOTE => {
                tracing::info!(verb, "play-note with no device attached");
                Reply::result("ok")
            }
            other => Reply::error(format!("no device handler for {other}")),
        }
    }
}
