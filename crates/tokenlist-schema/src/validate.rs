//! # Schema Validation
//!
//! Runtime validation of token list documents against JSON Schema
//! definitions (draft-07).
//!
//! ## Reporting
//!
//! Validation is exhaustive: every violation in the document is collected
//! in one pass and returned in the order the validator produces them, each
//! with the instance path, the schema path and a message. A curator fixing
//! a broken list sees all structural problems at once.
//!
//! ## Annotations
//!
//! Keywords the validator does not know (notably `markdownDescription`,
//! used for editor tooltips) are ignored rather than rejected. String
//! `format`s such as `uri` and `date-time` are asserted.
//!
//! ## Schema Resolution
//!
//! Schemas are indexed by filename and by their `$id`. `$ref`s to other
//! loaded schemas resolve from memory; any other remote reference is refused
//! so validation never touches the network.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;
use thiserror::Error;

/// Filename of the token list schema inside the schema directory.
pub const TOKENLIST_SCHEMA: &str = "tokenlist.schema.json";

/// Resolves `$ref` URIs against the schemas loaded from disk.
struct LocalSchemaRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Fall back to the last path segment so `./other.schema.json` and
        // absolute `$id`s under a different host both resolve.
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        Err(format!("refusing to fetch unknown schema reference {uri_str}").into())
    }
}

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Every violation found, in validator order.
        violations: ValidationViolations,
    },

    /// The schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or directory.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The document file could not be read or is not JSON.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// IO error reading the schema directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single structural violation.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer to the violating value in the document.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Ordered collection of violations from one validation pass.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A schema validator backed by the `jsonschema` crate.
///
/// Loads all JSON schemas from a directory at construction time and
/// validates documents against them by filename.
#[derive(Debug)]
pub struct SchemaValidator {
    schema_dir: PathBuf,
    /// Schema filename (e.g. `tokenlist.schema.json`) to parsed value.
    schemas: HashMap<String, Value>,
}

impl SchemaValidator {
    /// Load every `*.schema.json` file in `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the directory
    /// cannot be read or a schema file is not valid JSON.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_dir.display().to_string(),
                reason: format!("cannot read schema directory: {e}"),
            }
        })?;

        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".schema.json") {
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            let value: Value = serde_json::from_str(&content).map_err(|e| {
                SchemaValidationError::SchemaLoadError {
                    schema_name: name.to_string(),
                    reason: format!("invalid JSON: {e}"),
                }
            })?;
            tracing::debug!(schema = name, "loaded schema");
            schemas.insert(name.to_string(), value);
        }

        Ok(Self { schema_dir, schemas })
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Returns the names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Look up a loaded schema by filename.
    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft7);
        opts.should_validate_formats(true);

        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (filename, value) in &self.schemas {
            if let Some(id) = value.get("$id").and_then(|v| v.as_str()) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.clone(), value.clone());
        }

        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });
        opts
    }

    /// Compile the named schema into a reusable `Validator`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the schema is not
    /// loaded, or `SchemaValidationError::ValidatorBuildError` if it does
    /// not compile.
    pub fn build_validator(&self, schema_name: &str) -> Result<Validator, SchemaValidationError> {
        let schema_value = self.schemas.get(schema_name).ok_or_else(|| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.to_string(),
                reason: format!("schema not found in {}", self.schema_dir.display()),
            }
        })?;

        self.build_options().build(schema_value).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Validate a parsed JSON value against a named schema, collecting every
    /// violation.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with all violations
    /// if the document is invalid.
    pub fn validate_document(
        &self,
        instance: &Value,
        schema_name: &str,
    ) -> Result<(), SchemaValidationError> {
        let validator = self.build_validator(schema_name)?;

        let errors: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(schema = schema_name, count = errors.len(), "schema violations");
            Err(SchemaValidationError::ValidationFailed {
                schema_name: schema_name.to_string(),
                violations: ValidationViolations { violations: errors },
            })
        }
    }

    /// Validate a token list document against `tokenlist.schema.json`.
    pub fn validate_token_list(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        self.validate_document(instance, TOKENLIST_SCHEMA)
    }

    /// Read a JSON document from disk and validate it against `schema_name`.
    ///
    /// Returns the parsed value on success so callers can continue with the
    /// same bytes that were validated.
    pub fn validate_file(
        &self,
        document_path: &Path,
        schema_name: &str,
    ) -> Result<Value, SchemaValidationError> {
        let value = load_json(document_path)?;
        self.validate_document(&value, schema_name)?;
        Ok(value)
    }
}

/// Read and parse a JSON document, mapping failures to `DocumentLoadError`.
pub fn load_json(path: &Path) -> Result<Value, SchemaValidationError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SchemaValidationError::DocumentLoadError {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        }
    })?;
    serde_json::from_str(&content).map_err(|e| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}
