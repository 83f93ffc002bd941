//! # Validate Subcommand
//!
//! Runs the full pipeline over one token list:
//!
//! 1. structural validation against `tokenlist.schema.json`, reporting
//!    every violation;
//! 2. conversion to the typed model (integer fields written as `1.0` are
//!    reported against their token);
//! 3. domain rules and logo checks, reporting the first violation of each
//!    token.
//!
//! A list that fails step 1 never reaches step 3. Violations go to stderr,
//! the success line to stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use tokenlist_schema::{SchemaValidationError, SchemaValidator, TOKENLIST_SCHEMA};

use crate::config::ProjectLayout;

/// Arguments for the `tokenlist validate` subcommand.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Token list to validate (defaults to `tokens/list.json`).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the list passes, 1 on any violation. Missing or
/// malformed input is an error.
pub fn run_validate(args: &ValidateArgs, layout: &ProjectLayout) -> Result<u8> {
    let path = match &args.path {
        Some(path) => crate::resolve_path(path, &layout.root),
        None => layout.list.clone(),
    };

    let validator =
        SchemaValidator::new(&layout.schema_dir).context("failed to load JSON schemas")?;
    tracing::info!(
        schema_count = validator.schema_count(),
        "loaded schema registry"
    );

    match validate_list(&validator, &path, layout.asset_root())? {
        Outcome::Passed { tokens } => {
            println!("OK: {} ({tokens} tokens)", path.display());
            Ok(0)
        }
        Outcome::Failed { header, lines } => {
            eprintln!("FAIL: {}: {header}", path.display());
            for line in lines {
                eprintln!("{line}");
            }
            Ok(1)
        }
    }
}

/// Result of one pipeline run that got as far as checking content.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Passed { tokens: usize },
    /// A summary line plus one line per violation.
    Failed { header: String, lines: Vec<String> },
}

/// Validate the list at `path`, resolving logos against `asset_root`.
pub fn validate_list(
    validator: &SchemaValidator,
    path: &Path,
    asset_root: &Path,
) -> Result<Outcome> {
    let value = match validator.validate_file(path, TOKENLIST_SCHEMA) {
        Ok(value) => value,
        Err(SchemaValidationError::ValidationFailed { violations, .. }) => {
            tracing::info!(count = violations.len(), "schema validation failed");
            return Ok(Outcome::Failed {
                header: format!("{} schema violation(s)", violations.len()),
                lines: violations.violations().iter().map(ToString::to_string).collect(),
            });
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to validate {}", path.display()));
        }
    };

    let (list, report) = tokenlist_rules::validate_document(value, asset_root)
        .with_context(|| format!("failed to read {} as a token list", path.display()))?;

    if report.is_ok() {
        Ok(Outcome::Passed {
            tokens: list.tokens.len(),
        })
    } else {
        Ok(Outcome::Failed {
            header: format!("{} domain rule violation(s)", report.violations.len()),
            lines: report.violations.iter().map(|v| format!("  {v}")).collect(),
        })
    }
}
