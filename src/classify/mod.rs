//! Fragment classification.
//!
//! Each fragment goes through the same steps:
//!
//! 1. [`multimap`]: count distinct genomic loci per mate
//! 2. [`binning`]: group alignments by transcript and by transcript cluster
//! 3. [`pairing`]: pick pairs by the first strategy that yields any
//! 4. [`tags`]: write the classification onto copies of the paired records
//! 5. [`dispatch`]: route the result to one of the output channels

pub mod binning;
pub mod dispatch;
pub mod multimap;
pub mod pairing;
pub mod selection;
pub mod tags;

pub use dispatch::{DispatchError, DispatchSummary, Dispatcher, Route};
pub use pairing::{ClassifiedPair, PairClassifier, Pairing};

use crate::core::types::LibraryType;
use crate::utils::validation::{
    validate_library_type, validate_max_fragment_length, validate_max_multihits, ConfigError,
};

pub const DEFAULT_MAX_FRAGMENT_LENGTH: u32 = 1000;
pub const DEFAULT_MAX_MULTIHITS: usize = 40;

/// Run configuration, validated before any fragment is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyConfig {
    /// Accepted for compatibility with existing pipelines; pairing does not
    /// filter on fragment length
    pub max_fragment_length: u32,
    pub library_type: LibraryType,
    /// Mates mapping to more genomic loci than this are routed to multimap
    pub max_multihits: usize,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            max_fragment_length: DEFAULT_MAX_FRAGMENT_LENGTH,
            library_type: LibraryType::default(),
            max_multihits: DEFAULT_MAX_MULTIHITS,
        }
    }
}

impl ClassifyConfig {
    /// Build a configuration from raw user values
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` among the three values.
    pub fn new(
        max_fragment_length: i64,
        library_type: &str,
        max_multihits: i64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            max_fragment_length: validate_max_fragment_length(max_fragment_length)?,
            library_type: validate_library_type(library_type)?,
            max_multihits: validate_max_multihits(max_multihits)?,
        })
    }
}
