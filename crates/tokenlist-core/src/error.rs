//! # Error Types
//!
//! Errors raised while parsing addresses, loading a token list document, or
//! reading configuration. All use `thiserror` for `Display` and `Error`.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for `tokenlist-core`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An address string could not be parsed.
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// The token list document could not be read from disk.
    #[error("cannot read token list at {path}: {source}")]
    ReadList {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the model.
    #[error("cannot parse token list: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configuration value is malformed.
    #[error("invalid configuration for {key}: {reason}")]
    InvalidConfig {
        /// Name of the setting (usually the environment variable).
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Error parsing a hex account address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The address does not have exactly 40 hex digits after the optional `0x`.
    #[error("invalid address {input:?}: expected 40 hex digits, got {len}")]
    InvalidLength {
        /// The rejected input.
        input: String,
        /// Number of characters after the prefix.
        len: usize,
    },

    /// The address contains a character that is not a hex digit.
    #[error("invalid address {input:?}: {reason}")]
    InvalidHex {
        /// The rejected input.
        input: String,
        /// Decoder message.
        reason: String,
    },
}
