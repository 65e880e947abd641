use std::fmt;
use std::io;

use apienvelope_core::EnvelopeError;
use apienvelope_io::IoError;

// Exit codes follow sysexits-style ranges.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const NOT_FOUND: i32 = 51;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
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
        io::ErrorKind::NotFound => NOT_FOUND,
        io::ErrorKind::BrokenPipe => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn envelope_error(context: &str, err: EnvelopeError) -> CliError {
    match err {
        EnvelopeError::Decoding { .. } | EnvelopeError::Encoding(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        EnvelopeError::NoSuchItem { .. } | EnvelopeError::EndOfItems => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
    }
}

pub fn stream_error(context: &str, err: IoError) -> CliError {
    match err {
        IoError::Io(source) => io_error(context, source),
        IoError::Envelope(err) => envelope_error(context, err),
        IoError::EnvelopeTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        IoError::ConnectionClosed => CliError::new(DATA_INVALID, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found_code() {
        let err = io_error("open", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.code, NOT_FOUND);
        assert!(err.message.starts_with("open: "));
    }

    #[test]
    fn decode_failure_is_data_invalid() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = stream_error(
            "read",
            IoError::Envelope(EnvelopeError::Decoding {
                what: "envelope",
                source,
            }),
        );
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn empty_input_is_data_invalid() {
        let err = stream_error("read", IoError::ConnectionClosed);
        assert_eq!(err.code, DATA_INVALID);
    }
}
