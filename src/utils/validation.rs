//! Centralized validation of run configuration.

use crate::core::types::LibraryType;

/// Upper bound on `max_fragment_length`, far beyond any real library
pub const MAX_FRAGMENT_LENGTH_LIMIT: u32 = 1_000_000;

/// Configuration error types, all raised before any fragment is processed
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown library type '{0}' (expected unstranded, strand-matches-mate1 or strand-matches-mate2)")]
    UnknownLibraryType(String),
    #[error("Maximum multihits must be positive, got {0}")]
    NonPositiveMultihits(i64),
    #[error("Maximum fragment length must be between 1 and {MAX_FRAGMENT_LENGTH_LIMIT}, got {0}")]
    InvalidFragmentLength(i64),
}

/// Validate the multimap ceiling.
///
/// # Errors
///
/// Returns `ConfigError::NonPositiveMultihits` for zero or negative values.
pub fn validate_max_multihits(value: i64) -> Result<usize, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NonPositiveMultihits(value));
    }
    usize::try_from(value).map_err(|_| ConfigError::NonPositiveMultihits(value))
}

/// Validate the maximum fragment length.
///
/// # Errors
///
/// Returns `ConfigError::InvalidFragmentLength` when the value is not in
/// `1..=MAX_FRAGMENT_LENGTH_LIMIT`.
pub fn validate_max_fragment_length(value: i64) -> Result<u32, ConfigError> {
    match u32::try_from(value) {
        Ok(v) if (1..=MAX_FRAGMENT_LENGTH_LIMIT).contains(&v) => Ok(v),
        _ => Err(ConfigError::InvalidFragmentLength(value)),
    }
}

/// Validate a library type name.
///
/// # Errors
///
/// Returns `ConfigError::UnknownLibraryType` for unrecognized names.
pub fn validate_library_type(value: &str) -> Result<LibraryType, ConfigError> {
    LibraryType::parse(value)
}
