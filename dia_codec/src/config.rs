use crate::DiaError;
use anyhow::Result;

pub const DEFAULT_CHUNK_LEN: usize = 4096;
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Knobs of one serialize or deserialize call.
///
/// None of these change the wire grammar; a reader decodes any writer's output
/// as long as its `max_depth` is not smaller than the data's nesting.
#[derive(Clone, Debug)]
pub struct CodecConfig {
    /// Largest payload of one chunk-sequence segment.
    pub chunk_len: usize,
    /// Deepest allowed container nesting, counting the top-level value as 1.
    pub max_depth: usize,
    /// Whether equal String/Symbol values after the first are written as References.
    pub dedup_text: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            chunk_len: DEFAULT_CHUNK_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            dedup_text: true,
        }
    }
}

impl CodecConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_len == 0 {
            Err(DiaError::InvalidConfig("chunk_len must be positive"))?;
        }
        if self.max_depth == 0 {
            Err(DiaError::InvalidConfig("max_depth must be positive"))?;
        }
        Ok(())
    }
}
