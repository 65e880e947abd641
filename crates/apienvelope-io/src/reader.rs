use std::io::{ErrorKind, Read};

use apienvelope_core::Envelope;
use bytes::BytesMut;
use tracing::debug;

use crate::config::IoConfig;
use crate::error::{IoError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads one envelope from any `Read` stream.
///
/// The whole stream is consumed up to EOF before decoding, so callers never
/// see a partially read envelope.
pub struct EnvelopeReader<T> {
    inner: T,
    buf: BytesMut,
    config: IoConfig,
}

impl<T: Read> EnvelopeReader<T> {
    /// Create a new envelope reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, IoConfig::default())
    }

    /// Create a new envelope reader with explicit configuration.
    pub fn with_config(inner: T, config: IoConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the stream to EOF and decode it as an envelope (blocking).
    ///
    /// Returns `Err(IoError::ConnectionClosed)` if the stream is empty.
    pub fn read_envelope(&mut self) -> Result<Envelope> {
        self.buf.clear();
        loop {
            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(IoError::Io(err)),
            };

            if read == 0 {
                break;
            }

            let size = self.buf.len() + read;
            if size > self.config.max_envelope_size {
                return Err(IoError::EnvelopeTooLarge {
                    size,
                    max: self.config.max_envelope_size,
                });
            }
            self.buf.extend_from_slice(&chunk[..read]);
        }

        if self.buf.is_empty() {
            return Err(IoError::ConnectionClosed);
        }

        let envelope = Envelope::from_slice(&self.buf)?;
        debug!(
            size = self.buf.len(),
            items = envelope.data.item_count(),
            method = %envelope.method,
            "read envelope"
        );
        Ok(envelope)
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

    /// Update maximum envelope size for subsequent reads.
    pub fn set_max_envelope_size(&mut self, max_envelope_size: usize) {
        self.config.max_envelope_size = max_envelope_size;
    }

    /// Current reader configuration.
    pub fn config(&self) -> &IoConfig {
        &self.config
    }
}

/// Read one envelope from `inner` with default configuration.
pub fn read_envelope<T: Read>(inner: T) -> Result<Envelope> {
    EnvelopeReader::new(inner).read_envelope()
}
