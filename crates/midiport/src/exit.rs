use std::fmt;
use std::io;

use midiport_bridge::BridgeError;
use midiport_frame::FrameError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::BrokenPipe | io::ErrorKind::WriteZero => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::PayloadTooLarge { .. } | FrameError::Incomplete { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::Empty => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

pub fn bridge_error(context: &str, err: BridgeError) -> CliError {
    match err {
        BridgeError::Frame(err) => frame_error(context, err),
        BridgeError::TermEncode(err) => CliError::new(INTERNAL, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use midiport_frame::DecodeError;

    use super::*;

    #[test]
    fn broken_output_is_failure() {
        let err = bridge_error(
            "port failed",
            BridgeError::Frame(FrameError::Io(io::ErrorKind::BrokenPipe.into())),
        );
        assert_eq!(err.code, FAILURE);
        assert!(err.message.starts_with("port failed: "));
    }

    #[test]
    fn oversized_frame_is_data_invalid() {
        let err = frame_error("read", FrameError::PayloadTooLarge { size: 10, max: 4 });
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn decode_errors_are_data_invalid() {
        let err = bridge_error("decode", DecodeError::OddLength { len: 3 }.into());
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn permission_denied_maps_through() {
        let err = io_error("open", io::ErrorKind::PermissionDenied.into());
        assert_eq!(err.code, PERMISSION_DENIED);
    }
}
