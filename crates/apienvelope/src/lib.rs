//! Uniform JSON API envelopes following the Google JSON style guide.
//!
//! apienvelope gives every endpoint the same top-level response shape:
//! request metadata, a `data` section with typed-on-demand items, and an
//! `error` section with structured details.
//!
//! # Crate Structure
//!
//! - [`envelope`] — Envelope, data payload, item store and cursor, error payload
//! - [`io`] — Reading and writing envelopes over byte streams
//!
//! ```
//! use apienvelope::envelope::Envelope;
//!
//! let mut env = Envelope::new();
//! env.api_version = "0.1".into();
//! env.method = "cars.get".into();
//! env.data.add_item(&("red", "SUV")).unwrap();
//!
//! let bytes = env.to_vec().unwrap();
//! let mut decoded = Envelope::from_slice(&bytes).unwrap();
//! let car: (String, String) = decoded.data.current_item().unwrap();
//! assert_eq!(car.0, "red");
//! assert!(decoded.data.next_item::<(String, String)>().unwrap_err().is_end_of_items());
//! ```

/// Re-export envelope types.
pub mod envelope {
    pub use apienvelope_core::*;
}

/// Re-export stream reader/writer types.
pub mod io {
    pub use apienvelope_io::*;
}

pub use apienvelope_core::{DataPayload, Envelope, EnvelopeError, ErrorDetail, ErrorPayload, Item};
