//! # tokenlist-schema — Structural Validation
//!
//! Runtime JSON Schema validation of token list documents.
//!
//! The [`validate`] module loads every `*.schema.json` file from the
//! `schema/` directory, registers them for `$ref` resolution without network
//! access, and validates documents against them. Key entry point:
//!
//! - [`SchemaValidator::validate_token_list`] — validates a parsed document
//!   against `tokenlist.schema.json` and returns every violation at once.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tokenlist-*` crates; operates on
//!   `serde_json::Value` so malformed shapes are reported, not rejected by
//!   a typed deserializer.
//! - Schema validation is the first gate: documents that fail here never
//!   reach the domain rules.

pub mod validate;

pub use validate::{
    SchemaValidationError, SchemaValidator, ValidationViolations, Violation, TOKENLIST_SCHEMA,
};
