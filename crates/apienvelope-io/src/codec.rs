use apienvelope_core::Envelope;
use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

use crate::config::IoConfig;
use crate::error::{IoError, Result};

/// Newline-delimited JSON envelopes for `FramedRead` / `FramedWrite`.
///
/// Each envelope is written as one compact JSON line. Blank lines are skipped
/// on decode. The configured maximum size applies to each line; `pretty` is
/// ignored since indented output cannot be line-delimited.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeCodec {
    config: IoConfig,
    next_index: usize,
}

impl EnvelopeCodec {
    /// Create a codec with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with explicit configuration.
    pub fn with_config(config: IoConfig) -> Self {
        Self {
            config,
            next_index: 0,
        }
    }

    /// Current codec configuration.
    pub fn config(&self) -> &IoConfig {
        &self.config
    }

    fn decode_line(&self, line: &[u8]) -> Result<Option<Envelope>> {
        let line = line.trim_ascii();
        if line.is_empty() {
            return Ok(None);
        }
        if line.len() > self.config.max_envelope_size {
            return Err(IoError::EnvelopeTooLarge {
                size: line.len(),
                max: self.config.max_envelope_size,
            });
        }
        Ok(Some(Envelope::from_slice(line)?))
    }
}

impl Decoder for EnvelopeCodec {
    type Item = Envelope;
    type Error = IoError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Envelope>> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if src.len() > self.config.max_envelope_size {
                    return Err(IoError::EnvelopeTooLarge {
                        size: src.len(),
                        max: self.config.max_envelope_size,
                    });
                }
                self.next_index = src.len();
                return Ok(None);
            };

            let line_end = self.next_index + offset;
            self.next_index = 0;
            let line = src.split_to(line_end + 1);
            if let Some(envelope) = self.decode_line(&line[..line_end])? {
                return Ok(Some(envelope));
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Envelope>> {
        if let Some(envelope) = self.decode(src)? {
            return Ok(Some(envelope));
        }
        self.next_index = 0;
        let rest = src.split();
        self.decode_line(&rest)
    }
}

impl Encoder<&Envelope> for EnvelopeCodec {
    type Error = IoError;

    fn encode(&mut self, item: &Envelope, dst: &mut BytesMut) -> Result<()> {
        let mut encoded = item.to_vec()?;
        // Raw items keep their own whitespace. A bare newline in valid JSON is
        // always insignificant, so flattening it keeps one envelope per line.
        for byte in encoded.iter_mut().filter(|b| **b == b'\n') {
            *byte = b' ';
        }
        if encoded.len() > self.config.max_envelope_size {
            return Err(IoError::EnvelopeTooLarge {
                size: encoded.len(),
                max: self.config.max_envelope_size,
            });
        }
        dst.reserve(encoded.len() + 1);
        dst.put_slice(&encoded);
        dst.put_u8(b'\n');
        Ok(())
    }
}

impl Encoder<Envelope> for EnvelopeCodec {
    type Error = IoError;

    fn encode(&mut self, item: Envelope, dst: &mut BytesMut) -> Result<()> {
        Encoder::<&Envelope>::encode(self, &item, dst)
    }
}

/// Read an async stream to EOF and decode it as one envelope.
pub async fn read_envelope_async<R>(reader: &mut R, config: &IoConfig) -> Result<Envelope>
where
    R: AsyncRead + Unpin,
{
    let limit = u64::try_from(config.max_envelope_size.saturating_add(1)).unwrap_or(u64::MAX);
    let mut buf = Vec::new();
    reader.take(limit).read_to_end(&mut buf).await?;

    if buf.is_empty() {
        return Err(IoError::ConnectionClosed);
    }
    if buf.len() > config.max_envelope_size {
        return Err(IoError::EnvelopeTooLarge {
            size: buf.len(),
            max: config.max_envelope_size,
        });
    }

    let envelope = Envelope::from_slice(&buf)?;
    debug!(size = buf.len(), items = envelope.data.item_count(), "read envelope");
    Ok(envelope)
}

/// Encode one envelope and write it fully to an async stream, then flush.
pub async fn write_envelope_async<W>(
    writer: &mut W,
    envelope: &Envelope,
    config: &IoConfig,
) -> Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let encoded = if config.pretty {
        envelope.to_vec_pretty()?
    } else {
        envelope.to_vec()?
    };
    if encoded.len() > config.max_envelope_size {
        return Err(IoError::EnvelopeTooLarge {
            size: encoded.len(),
            max: config.max_envelope_size,
        });
    }

    writer.write_all(&encoded).await?;
    writer.flush().await?;
    debug!(size = encoded.len(), items = envelope.data.item_count(), "wrote envelope");
    Ok(encoded.len())
}
