/// Errors that can occur while building, encoding or reading an envelope.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// A value could not be converted to its JSON representation.
    #[error("failed to encode value: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Input bytes do not match the expected structure.
    #[error("failed to decode {what}: {source}")]
    Decoding {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The cursor does not point at a stored item.
    #[error("no such item at position {position} ({count} items stored)")]
    NoSuchItem { position: usize, count: usize },

    /// The cursor cannot advance past the final item.
    #[error("end of items")]
    EndOfItems,
}

impl EnvelopeError {
    pub(crate) fn decoding(what: &'static str, source: serde_json::Error) -> Self {
        Self::Decoding { what, source }
    }

    /// True for the normal end-of-iteration signal from `DataPayload::next_item`.
    pub fn is_end_of_items(&self) -> bool {
        matches!(self, Self::EndOfItems)
    }
}

pub type Result<T> = std::result::Result<T, EnvelopeError>;
