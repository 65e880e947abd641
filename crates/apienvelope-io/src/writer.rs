use std::io::{ErrorKind, Write};

use apienvelope_core::Envelope;
use tracing::debug;

use crate::config::IoConfig;
use crate::error::{IoError, Result};

/// Writes complete envelopes to any `Write` stream.
pub struct EnvelopeWriter<T> {
    inner: T,
    config: IoConfig,
}

impl<T: Write> EnvelopeWriter<T> {
    /// Create a new envelope writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, IoConfig::default())
    }

    /// Create a new envelope writer with explicit configuration.
    pub fn with_config(inner: T, config: IoConfig) -> Self {
        Self { inner, config }
    }

    /// Encode and write a complete envelope, then flush (blocking).
    ///
    /// Returns the number of bytes written.
    pub fn write_envelope(&mut self, envelope: &Envelope) -> Result<usize> {
        let encoded = if self.config.pretty {
            envelope.to_vec_pretty()?
        } else {
            envelope.to_vec()?
        };
        self.send(&encoded)?;
        debug!(
            size = encoded.len(),
            items = envelope.data.item_count(),
            method = %envelope.method,
            "wrote envelope"
        );
        Ok(encoded.len())
    }

    /// Write already-encoded envelope bytes, then flush.
    pub fn send(&mut self, encoded: &[u8]) -> Result<()> {
        if encoded.len() > self.config.max_envelope_size {
            return Err(IoError::EnvelopeTooLarge {
                size: encoded.len(),
                max: self.config.max_envelope_size,
            });
        }

        let mut offset = 0usize;
        while offset < encoded.len() {
            match self.inner.write(&encoded[offset..]) {
                Ok(0) => return Err(IoError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(IoError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(IoError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Switch between compact and indented output.
    pub fn set_pretty(&mut self, pretty: bool) {
        self.config.pretty = pretty;
    }

    /// Current writer configuration.
    pub fn config(&self) -> &IoConfig {
        &self.config
    }
}

/// Write one envelope to `inner` with default configuration.
pub fn write_envelope<T: Write>(inner: T, envelope: &Envelope) -> Result<usize> {
    EnvelopeWriter::new(inner).write_envelope(envelope)
}
