use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{EnvelopeError, Result};

/// One payload record in its encoded JSON form.
///
/// Items are never decoded in place. Each read produces a fresh value of the
/// caller's type from the stored text.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Box<RawValue>);

impl Item {
    /// Encode a record into an item.
    pub fn encode<T: Serialize + ?Sized>(record: &T) -> Result<Self> {
        serde_json::value::to_raw_value(record)
            .map(Self)
            .map_err(EnvelopeError::Encoding)
    }

    /// Wrap already-encoded JSON text. The text must be a single valid JSON value.
    pub fn from_json(json: impl Into<String>) -> Result<Self> {
        RawValue::from_string(json.into())
            .map(Self)
            .map_err(|err| EnvelopeError::decoding("item", err))
    }

    /// Decode the item into a new value of type `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(self.0.get()).map_err(|err| EnvelopeError::decoding("item", err))
    }

    /// The encoded JSON text.
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// The encoded JSON bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.get().as_bytes()
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.0.get().len()
    }

    /// True when the encoded text is empty, which a valid item never is.
    pub fn is_empty(&self) -> bool {
        self.0.get().is_empty()
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Item {}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Item").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
