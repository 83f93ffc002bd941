//! # Domain Rules
//!
//! Cross-record invariants the JSON Schema cannot express. Runs only on
//! documents that already passed structural validation.
//!
//! Each token goes through the rule chain below. The chain stops at the first
//! failing rule for that token, then moves on to the next token, so one run
//! reports at most one violation per token but never hides a broken record
//! behind an earlier one.
//!
//! 1. `chainId` is positive.
//! 2. `address` is a well-formed address stored in exact EIP-55 form.
//! 3. `(chainId, address)` is unique.
//! 4. `(chainId, uppercase symbol)` is unique.
//! 5. every tag is declared under the root `tags`.
//! 6. the logo, if any, passes [`LogoChecker`].
//!
//! A token is recorded in the duplicate sets only once rules 1 and 2 pass,
//! and its symbol only after its contract key was accepted.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;
use tokenlist_core::{ChecksumAddress, CoreError, TokenInfo, TokenListFile};

use crate::error::{RuleError, RuleViolation, ViolationKind};
use crate::logo::LogoChecker;

/// Outcome of one rule run over a list.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub tokens_checked: usize,
    /// Logos that passed every check.
    pub logos_checked: usize,
    pub violations: Vec<RuleViolation>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// `Ok` with the report when clean, otherwise every violation.
    pub fn into_result(self) -> Result<Self, RuleError> {
        if self.violations.is_empty() {
            Ok(self)
        } else {
            Err(RuleError::Failed {
                violations: self.violations,
            })
        }
    }
}

/// Per-run state: the list being checked, the logo checker and the keys
/// already claimed by earlier tokens.
pub struct RuleContext<'a> {
    list: &'a TokenListFile,
    logos: LogoChecker,
    seen_contracts: HashSet<(u64, ChecksumAddress)>,
    seen_symbols: HashSet<(u64, String)>,
}

impl<'a> RuleContext<'a> {
    pub fn new(list: &'a TokenListFile, logos: LogoChecker) -> Self {
        Self {
            list,
            logos,
            seen_contracts: HashSet::new(),
            seen_symbols: HashSet::new(),
        }
    }

    /// Run the rule chain for one token. Returns whether a logo was checked.
    pub fn check_token(&mut self, token: &TokenInfo) -> Result<bool, ViolationKind> {
        if token.chain_id == 0 {
            return Err(ViolationKind::InvalidChainId {
                chain_id: token.chain_id,
            });
        }

        let checksum = ChecksumAddress::parse(&token.address)
            .map_err(|source| ViolationKind::InvalidAddress { source })?;
        if !checksum.is_exactly(&token.address) {
            return Err(ViolationKind::NotChecksummed {
                address: token.address.clone(),
                expected: checksum.to_string(),
            });
        }

        let contract_key = (token.chain_id, checksum.clone());
        if self.seen_contracts.contains(&contract_key) {
            return Err(ViolationKind::DuplicateContract {
                key: format!("{}:{}", token.chain_id, checksum),
            });
        }
        self.seen_contracts.insert(contract_key);

        let symbol_key = (token.chain_id, token.symbol.to_uppercase());
        if self.seen_symbols.contains(&symbol_key) {
            return Err(ViolationKind::DuplicateSymbol {
                symbol: token.symbol.clone(),
                chain_id: token.chain_id,
            });
        }
        self.seen_symbols.insert(symbol_key);

        if let Some(tag) = token.tag_ids().iter().find(|t| !self.list.declares_tag(t)) {
            return Err(ViolationKind::UnknownTag { tag: tag.clone() });
        }

        match &token.image {
            Some(image) => {
                self.logos.check(image, token.chain_id, &checksum)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Check every token in document order.
    pub fn run(self) -> ValidationReport {
        self.run_except(&HashSet::new())
    }

    /// Check every token except those at `rejected`, which were already
    /// reported and must not claim contract or symbol keys.
    pub fn run_except(mut self, rejected: &HashSet<usize>) -> ValidationReport {
        let list = self.list;
        let mut report = ValidationReport::default();

        for (index, token) in list.tokens.iter().enumerate() {
            report.tokens_checked += 1;
            if rejected.contains(&index) {
                continue;
            }
            match self.check_token(token) {
                Ok(logo) => {
                    if logo {
                        report.logos_checked += 1;
                    }
                    tracing::debug!(index, symbol = %token.symbol, chain_id = token.chain_id, "token passed");
                }
                Err(kind) => {
                    tracing::debug!(index, symbol = %token.symbol, error = %kind, "token rejected");
                    report.violations.push(RuleViolation {
                        index,
                        symbol: token.symbol.clone(),
                        address: token.address.clone(),
                        chain_id: token.chain_id,
                        kind,
                    });
                }
            }
        }

        tracing::info!(
            tokens = report.tokens_checked,
            logos = report.logos_checked,
            violations = report.violations.len(),
            "domain rules finished"
        );
        report
    }
}

/// Run every domain rule over `list`, resolving logos against `asset_root`
/// (the directory containing `images/`).
pub fn validate_token_list(list: &TokenListFile, asset_root: &Path) -> ValidationReport {
    RuleContext::new(list, LogoChecker::new(asset_root)).run()
}

/// Token integer fields checked for float encoding before typing.
const INTEGER_FIELDS: [&str; 2] = ["chainId", "decimals"];

/// Run every domain rule over a structurally valid JSON document.
///
/// JSON Schema's `integer` accepts `1.0`; the typed model does not. Tokens
/// whose `chainId` or `decimals` carry a fractional encoding are reported as
/// [`ViolationKind::NonIntegerNumber`] and skipped by the rule chain. The
/// value is rewritten as an integer only so the rest of the document can be
/// typed.
pub fn validate_document(
    mut document: Value,
    asset_root: &Path,
) -> Result<(TokenListFile, ValidationReport), CoreError> {
    let encoding = normalize_integer_fields(&mut document);
    let list = TokenListFile::from_value(document)?;

    let rejected: HashSet<usize> = encoding.iter().map(|v| v.index).collect();
    let mut report = RuleContext::new(&list, LogoChecker::new(asset_root)).run_except(&rejected);
    if !encoding.is_empty() {
        report.violations.extend(encoding);
        report.violations.sort_by_key(|v| v.index);
    }
    Ok((list, report))
}

/// Report and rewrite integral floats in each token's integer fields. Only
/// the first offending field of a token is reported.
fn normalize_integer_fields(document: &mut Value) -> Vec<RuleViolation> {
    let mut violations = Vec::new();
    let Some(tokens) = document.get_mut("tokens").and_then(Value::as_array_mut) else {
        return violations;
    };

    for (index, token) in tokens.iter_mut().enumerate() {
        let Some(fields) = token.as_object_mut() else {
            continue;
        };
        let mut first: Option<(&'static str, String)> = None;
        for field in INTEGER_FIELDS {
            let Some(number) = fields.get(field).and_then(Value::as_number) else {
                continue;
            };
            if number.is_u64() {
                continue;
            }
            let Some(float) = number.as_f64() else {
                continue;
            };
            if float.fract() != 0.0 || float < 0.0 || float > u64::MAX as f64 {
                continue;
            }
            let written = number.to_string();
            fields.insert(field.to_string(), Value::from(float as u64));
            first.get_or_insert((field, written));
        }

        if let Some((field, value)) = first {
            let text = |key: &str| {
                fields
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            violations.push(RuleViolation {
                index,
                symbol: text("symbol"),
                address: text("address"),
                chain_id: fields.get("chainId").and_then(Value::as_u64).unwrap_or(0),
                kind: ViolationKind::NonIntegerNumber { field, value },
            });
        }
    }
    violations
}
