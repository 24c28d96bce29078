//! Binary program images.
//!
//! A parsed [`Program`] can be written to bytes and loaded back without
//! re-parsing. The encoding is bincode over the serde derives enabled by the
//! `cache` feature.

use crate::Program;

/// Failure to encode or decode a program image.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to encode program '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: bincode::Error,
    },
    #[error("failed to decode program image: {0}")]
    Decode(#[source] bincode::Error),
}

impl Program {
    /// Serialize this program to a byte image.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CacheError> {
        bincode::serialize(self).map_err(|source| CacheError::Encode {
            name: self.name.clone(),
            source,
        })
    }

    /// Deserialize a program from a byte image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Program, CacheError> {
        bincode::deserialize(bytes).map_err(CacheError::Decode)
    }
}
