/// Default maximum envelope size: 16 MiB.
pub const DEFAULT_MAX_ENVELOPE_SIZE: usize = 16 * 1024 * 1024;

/// Controls how envelopes are read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoConfig {
    /// Maximum encoded envelope size in bytes, applied on read and write.
    pub max_envelope_size: usize,
    /// When true, envelopes are written as indented JSON.
    pub pretty: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            max_envelope_size: DEFAULT_MAX_ENVELOPE_SIZE,
            pretty: false,
        }
    }
}
