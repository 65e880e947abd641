//! Standard JSON API envelope following the Google JSON style guide.
//!
//! Every envelope has the same top-level shape:
//! - request metadata (`apiVersion`, `context`, `id`, `method`, `params`)
//! - a `data` section holding payload metadata and an ordered list of items
//! - an `error` section holding a code, a message and detail records
//!
//! Items are kept as opaque, already-encoded JSON. They are decoded on demand
//! into whatever type the caller asks for, either directly or through the
//! payload's sequential item cursor.

pub mod data;
mod de;
pub mod envelope;
pub mod error;
pub mod error_payload;
pub mod fields;
pub mod item;

pub use data::DataPayload;
pub use envelope::Envelope;
pub use error::{EnvelopeError, Result};
pub use error_payload::{ErrorDetail, ErrorPayload};
pub use fields::{join_fields, split_fields, FIELD_SEPARATOR};
pub use item::Item;
