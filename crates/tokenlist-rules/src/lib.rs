//! # tokenlist-rules — Domain Rules and Logo Policy
//!
//! Everything a token list must satisfy beyond its JSON Schema:
//!
//! - [`rules`] — per-token invariants (checksummed address, unique contract
//!   and symbol per chain, declared tags) run through a [`RuleContext`].
//! - [`logo`] — the logo asset policy: path convention, format, size cap
//!   and squareness.
//! - [`svg`] — content gate for SVG logos.
//! - [`error`] — [`RuleViolation`], [`ViolationKind`], [`LogoError`] and
//!   [`RuleError`].
//!
//! ## Crate Policy
//!
//! - Operates on the typed `tokenlist_core::TokenListFile`; structural
//!   validation must already have passed.
//! - Read-only file system access.

pub mod error;
pub mod logo;
pub mod rules;
pub mod svg;

pub use error::{LogoError, RuleError, RuleViolation, ViolationKind};
pub use logo::{CheckedLogo, LogoChecker, LogoFormat, ALLOWED_EXTENSIONS};
pub use rules::{validate_document, validate_token_list, RuleContext, ValidationReport};
pub use svg::SvgRule;
