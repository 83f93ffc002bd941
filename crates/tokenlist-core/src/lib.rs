//! # tokenlist-core — Foundational Types for the Token List
//!
//! Defines the in-memory model of a token list document and the primitives
//! every other crate in the workspace builds on. Depends on nothing internal.
//!
//! ## Contents
//!
//! - [`model`] — `TokenListFile`, `TokenInfo` and the nested records
//!   (tags, sources, license, verification, attributes). Free-form extension
//!   fields are kept as `serde_json::Map` so nothing a curator writes is lost.
//! - [`address`] — EIP-55 checksummed addresses (`ChecksumAddress`).
//! - [`lookup`] — pure accessors over a loaded list and the logo-URI builder.
//! - [`error`] — `CoreError` and `AddressError`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tokenlist-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod address;
pub mod error;
pub mod lookup;
pub mod model;

pub use address::{to_checksum_address, ChecksumAddress};
pub use error::{AddressError, CoreError};
pub use lookup::{
    logo_uri, token_by_address, token_by_symbol, tokens_by_chain, tokens_by_tag, LogoUriOptions,
};
pub use model::{
    Attribute, AttributeValue, License, Source, SourceType, TagDefinition, TokenInfo,
    TokenListFile, Verification, Version,
};
