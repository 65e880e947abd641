//! Read and write API envelopes over byte streams.
//!
//! The envelope crate only converts between envelopes and bytes. This crate
//! supplies the other half of the boundary:
//! - [`EnvelopeReader`] drains a `Read` stream and decodes one envelope
//! - [`EnvelopeWriter`] encodes an envelope and writes it fully to a `Write`
//! - with the `async` feature, tokio equivalents and a newline-delimited
//!   [`EnvelopeCodec`](codec::EnvelopeCodec) for streams of envelopes

#[cfg(feature = "async")]
pub mod codec;
pub mod config;
pub mod error;
pub mod reader;
pub mod writer;

#[cfg(feature = "async")]
pub use codec::{read_envelope_async, write_envelope_async, EnvelopeCodec};
pub use config::{IoConfig, DEFAULT_MAX_ENVELOPE_SIZE};
pub use error::{IoError, Result};
pub use reader::{read_envelope, EnvelopeReader};
pub use writer::{write_envelope, EnvelopeWriter};
