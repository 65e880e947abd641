use apienvelope_core::EnvelopeError;

/// Errors that can occur while moving envelopes across a byte stream.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// The envelope could not be encoded or decoded.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// The input exceeds the configured maximum size.
    #[error("envelope too large ({size} bytes, max {max})")]
    EnvelopeTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing.
    #[error("envelope I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before any envelope bytes were received.
    #[error("connection closed (no envelope received)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, IoError>;
