use std::io::{Read, Write};

use midiport_frame::{
    Frame, FrameConfig, FrameError, FrameReader, FrameWriter, PayloadEncoding, SharedFrameWriter,
};
use midiport_term::{decode, Term};

use crate::dispatch::{Dispatcher, Outcome, Reply, Step};
use crate::error::Result;
use crate::events::PortEvent;
use crate::message::Message;
use crate::response::encode_outcome;

/// Configuration for a [`Port`].
#[derive(Debug, Clone, Default)]
pub struct PortConfig {
    /// Representation of payloads in both directions.
    pub encoding: PayloadEncoding,
    /// Framing limits.
    pub frame: FrameConfig,
}

/// The synchronous read→decode→dispatch→respond loop over one channel.
///
/// Input and output streams are supplied by the caller, so the loop runs the
/// same against stdin/stdout or in-memory buffers.
pub struct Port<R, W> {
    reader: FrameReader<R>,
    writer: SharedFrameWriter<W>,
    dispatcher: Dispatcher,
    config: PortConfig,
}

impl<R: Read, W: Write> Port<R, W> {
    pub fn new(input: R, output: W, dispatcher: Dispatcher, config: PortConfig) -> Self {
        Self {
            reader: FrameReader::with_config(input, config.frame.clone()),
            writer: SharedFrameWriter::new(FrameWriter::with_config(output, config.frame.clone())),
            dispatcher,
            config,
        }
    }

    /// A handle for writing frames from outside the loop.
    pub fn writer(&self) -> SharedFrameWriter<W> {
        self.writer.clone()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn config(&self) -> &PortConfig {
        &self.config
    }

    /// Process frames until `stop` completes or the shutdown signal fires.
    ///
    /// Returns `Ok(())` after a clean stop. A closed input channel comes back
    /// as `Err(BridgeError::Frame(FrameError::Empty))`; I/O failures on either
    /// stream are returned as well. Nothing wrong with an individual frame
    /// ends the loop.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.dispatcher.shutdown().is_triggered() {
                self.dispatcher
                    .events()
                    .record(&PortEvent::ShutdownSignalled);
                return Ok(());
            }

            if self.step()? == Step::Exit {
                return Ok(());
            }
        }
    }

    /// Read one frame, handle it, and write the reply if there is one.
    pub fn step(&mut self) -> Result<Step> {
        let events = self.dispatcher.events();

        let frame = match self.reader.read_frame() {
            Ok(frame) => frame,
            Err(FrameError::Empty) => {
                events.record(&PortEvent::ChannelClosed);
                return Err(FrameError::Empty.into());
            }
            Err(error @ (FrameError::Incomplete { .. } | FrameError::PayloadTooLarge { .. })) => {
                events.record(&PortEvent::FrameRejected { error: &error });
                return Ok(Step::Continue(Outcome::NoResponse));
            }
            Err(error) => return Err(error.into()),
        };
        events.record(&PortEvent::FrameReceived {
            raw_len: frame.raw_len(),
        });

        let step = self.handle_frame(&frame);
        if let Step::Continue(outcome) = &step {
            self.respond(outcome)?;
        }
        Ok(step)
    }

    /// Decide what to do with one frame, without writing anything.
    pub fn handle_frame(&self, frame: &Frame) -> Step {
        let events = self.dispatcher.events();

        let term = match self.decode_payload(frame.payload()) {
            Ok(term) => term,
            Err(error) => {
                events.record(&PortEvent::PayloadRejected { error: &error });
                return Step::Continue(Outcome::NoResponse);
            }
        };

        match Message::extract(term) {
            Ok(message) => self.dispatcher.dispatch(&message),
            Err(error) => {
                events.record(&PortEvent::MessageRejected { error: &error });
                Step::respond(Reply::error(error.to_string()))
            }
        }
    }

    fn decode_payload(&self, payload: &[u8]) -> Result<Term> {
        let bytes = self.config.encoding.unwrap(payload)?;
        Ok(decode(&bytes)?)
    }

    fn respond(&self, outcome: &Outcome) -> Result<()> {
        let Some(frame) = encode_outcome(outcome, self.config.encoding)? else {
            return Ok(());
        };
        self.writer.write_frame(&frame)?;
        if let Outcome::Respond(reply) = outcome {
            self.dispatcher
                .events()
                .record(&PortEvent::ReplySent { reply });
        }
        Ok(())
    }

    /// Consume the port and return its streams.
    pub fn into_parts(self) -> (FrameReader<R>, SharedFrameWriter<W>) {
        (self.reader, self.writer)
    }
}
