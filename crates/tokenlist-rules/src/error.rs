//! Rule violation types.
//!
//! A [`RuleViolation`] pins a [`ViolationKind`] to the token that produced
//! it (document index, symbol, address and chain) so every message tells the
//! curator exactly which record to fix. Logo policy failures nest under
//! `ViolationKind::Logo`.

use std::fmt;

use thiserror::Error;
use tokenlist_core::AddressError;

use crate::svg::SvgRule;

/// One broken invariant on one token.
#[derive(Debug, Error)]
pub enum ViolationKind {
    #[error("invalid chainId {chain_id}: must be a positive integer")]
    InvalidChainId { chain_id: u64 },

    /// An integer field written with a fractional part, e.g. `1.0`.
    #[error("{field} must be written as an integer (got {value})")]
    NonIntegerNumber { field: &'static str, value: String },

    #[error("invalid address: {source}")]
    InvalidAddress {
        #[source]
        source: AddressError,
    },

    #[error("address not checksummed: {address} (expected {expected})")]
    NotChecksummed { address: String, expected: String },

    /// `key` is `<chainId>:<checksum>`.
    #[error("duplicate contract: {key}")]
    DuplicateContract { key: String },

    #[error("duplicate symbol '{symbol}' on chain {chain_id}")]
    DuplicateSymbol { symbol: String, chain_id: u64 },

    #[error("unknown tag '{tag}'; define it under top-level 'tags' in the token list")]
    UnknownTag { tag: String },

    #[error(transparent)]
    Logo(#[from] LogoError),
}

/// Logo asset policy failure. Paths are repo-relative.
#[derive(Debug, Error)]
pub enum LogoError {
    #[error("logo '{image}' must live in '{expected_dir}' (expected {expected})")]
    WrongDirectory {
        image: String,
        expected_dir: String,
        expected: String,
    },

    #[error("logo '{image}' must be one of .png, .svg, .jpg, .jpeg (got '{ext}'; expected {expected})")]
    DisallowedExtension {
        image: String,
        ext: String,
        expected: String,
    },

    #[error("logo file name must match the checksummed address (got '{image}', expected {expected})")]
    NameMismatch { image: String, expected: String },

    #[error("logo file not found: {path}: {reason}")]
    NotFound { path: String, reason: String },

    #[error("logo {path} exceeds {} KiB ({size} bytes)", .limit / 1024)]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("could not read dimensions for logo {path}: {reason}")]
    UnreadableDimensions { path: String, reason: String },

    #[error("logo {path} must be square (got {width}x{height})")]
    NotSquare {
        path: String,
        width: usize,
        height: usize,
    },

    #[error("SVG logo {path} is not valid UTF-8 text")]
    SvgNotText { path: String },

    #[error("SVG logo {path} {rule}")]
    Svg { path: String, rule: SvgRule },
}

/// A violation attributed to a specific token.
#[derive(Debug)]
pub struct RuleViolation {
    /// Position in the `tokens` array.
    pub index: usize,
    pub symbol: String,
    pub address: String,
    pub chain_id: u64,
    pub kind: ViolationKind,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tokens[{}] {} ({} on chain {}): {}",
            self.index, self.symbol, self.address, self.chain_id, self.kind
        )
    }
}

/// The domain rules rejected the list.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("{} domain rule violation(s):\n{}", .violations.len(), render(.violations))]
    Failed { violations: Vec<RuleViolation> },
}

fn render(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}
