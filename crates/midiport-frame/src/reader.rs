use std::io::{ErrorKind, Read};

use bytes::{Buf, BytesMut};

use crate::codec::{check_unterminated, find_delimiter, take_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads delimiter-terminated frames from any `Read` stream.
///
/// Handles partial reads internally; callers always get complete frames.
/// After an oversized frame is rejected, input is discarded up to and
/// including the next delimiter so the following read starts on a frame
/// boundary.
///
/// Buffered bytes are searched for the delimiter only once, so a frame that
/// arrives in many small reads costs time linear in its length.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
    discarding: bool,
    /// Prefix of `buf` already known to hold no delimiter.
    scanned: usize,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
            discarding: false,
            scanned: 0,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::Empty)` when EOF is reached with nothing
    /// buffered, and `Err(FrameError::Incomplete)` when EOF cuts a frame short.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if self.discarding {
                self.skip_to_boundary();
            }

            if !self.discarding {
                match self.next_buffered() {
                    Ok(Some(frame)) => {
                        tracing::trace!(raw_len = frame.raw_len(), "frame read");
                        return Ok(frame);
                    }
                    Ok(None) => {}
                    Err(err) => {
                        self.discarding = true;
                        self.skip_to_boundary();
                        return Err(err);
                    }
                }
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(self.eof());
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    fn next_buffered(&mut self) -> Result<Option<Frame>> {
        let max = self.config.max_payload_size;
        let Some(pos) = find_delimiter(&self.buf, self.scanned) else {
            self.scanned = self.buf.len();
            check_unterminated(self.buf.len(), max)?;
            return Ok(None);
        };
        self.scanned = 0;
        take_frame(&mut self.buf, pos, max).map(Some)
    }

    fn skip_to_boundary(&mut self) {
        self.scanned = 0;
        match find_delimiter(&self.buf, 0) {
            Some(pos) => {
                self.buf.advance(pos + 1);
                self.discarding = false;
            }
            None => self.buf.clear(),
        }
    }

    fn eof(&mut self) -> FrameError {
        if self.buf.is_empty() {
            return FrameError::Empty;
        }
        let len = self.buf.len();
        self.buf.clear();
        self.scanned = 0;
        FrameError::Incomplete { len }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum payload size for subsequent frame decoding.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
