//! # Token List Document Model
//!
//! Typed view of `tokens/list.json`. Field names on the wire follow the
//! published list format, which mixes `camelCase` (`chainId`, `logoURI`,
//! `totalSupply`) with NFT-metadata `snake_case` (`external_url`,
//! `background_color`), so every non-trivial field carries an explicit
//! `#[serde(rename)]`.
//!
//! The model is deliberately permissive: structural rules live in the JSON
//! Schema and cross-record rules live in `tokenlist-rules`. Deserializing
//! only fails where a value cannot be represented at all (for example a
//! negative `chainId`).

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Root document of a token list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenListFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Publication time of this revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,

    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,

    /// Tag definitions keyed by tag id. Tokens reference these ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, TagDefinition>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,

    pub tokens: Vec<TokenInfo>,
}

impl TokenListFile {
    /// Parse a document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert an already-parsed JSON value (e.g. one that just passed
    /// schema validation) into the typed model.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::ReadList {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// True if `tag_id` is declared under the root `tags` mapping.
    pub fn declares_tag(&self, tag_id: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.contains_key(tag_id))
    }
}

/// One token entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Contract address, expected in EIP-55 checksum form.
    pub address: String,

    /// EIP-155 chain id.
    #[serde(rename = "chainId")]
    pub chain_id: u64,

    pub symbol: String,

    pub decimals: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Repo-relative logo path such as `images/1/0xAbC….svg`, or a URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,

    /// Tag ids; each must be declared in the root `tags` mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Absolute logo URI. Takes precedence over `image` when resolving logos.
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,

    /// Total supply as a base-10 integer string.
    #[serde(rename = "totalSupply", default, skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<String>,
}

impl TokenInfo {
    /// Tag ids carried by this token (empty if none).
    pub fn tag_ids(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// True if this token carries `tag_id`.
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tag_ids().iter().any(|t| t == tag_id)
    }
}

/// Semantic version of the list itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A categorical label declared once at the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Where a piece of token metadata came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SourceType>,

    /// Any other keys the curator attached.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Closed set of provenance kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Coingecko,
    Cmc,
    Project,
    Explorer,
    Manual,
    Other,
}

impl SourceType {
    /// Wire name of this source type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coingecko => "coingecko",
            Self::Cmc => "cmc",
            Self::Project => "project",
            Self::Explorer => "explorer",
            Self::Manual => "manual",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review policy and audit trail for the list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Verification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,

    #[serde(rename = "lastAudit", default, skip_serializing_if = "Option::is_none")]
    pub last_audit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auditor: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// NFT-style display attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trait_type: Option<String>,

    pub value: AttributeValue,

    /// Rendering hint such as `number` or `date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

/// Attribute value: either text or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_document() -> Value {
        json!({
            "name": "Example List",
            "timestamp": "2025-06-01T12:00:00Z",
            "version": { "major": 1, "minor": 4, "patch": 0 },
            "keywords": ["evm", "curated"],
            "license": { "name": "MIT", "url": "https://opensource.org/licenses/MIT" },
            "tags": {
                "stablecoin": { "name": "Stablecoin", "description": "Pegged to fiat" }
            },
            "sources": [
                { "name": "CoinGecko", "type": "coingecko", "fetchedAt": "2025-05-30" }
            ],
            "verification": { "policy": "manual-review", "lastAudit": "2025-05-31", "reviewers": 2 },
            "tokens": [{
                "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
                "chainId": 1,
                "symbol": "USDC",
                "decimals": 6,
                "name": "USD Coin",
                "image": "images/1/0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48.svg",
                "attributes": [
                    { "trait_type": "Category", "value": "Stablecoin" },
                    { "trait_type": "Launched", "value": 2018, "display_type": "number" }
                ],
                "extensions": { "bridgeInfo": { "10": { "tokenAddress": "0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85" } } },
                "tags": ["stablecoin"],
                "totalSupply": "1000000000"
            }]
        })
    }

    #[test]
    fn parses_full_document() {
        let list = TokenListFile::from_value(full_document()).unwrap();
        assert_eq!(list.name.as_deref(), Some("Example List"));
        assert_eq!(list.version.unwrap().to_string(), "1.4.0");
        assert!(list.declares_tag("stablecoin"));
        assert!(!list.declares_tag("meme"));

        let token = &list.tokens[0];
        assert_eq!(token.chain_id, 1);
        assert_eq!(token.decimals, 6);
        assert!(token.has_tag("stablecoin"));
        assert_eq!(token.total_supply.as_deref(), Some("1000000000"));
    }

    #[test]
    fn source_and_verification_keep_extra_fields() {
        let list = TokenListFile::from_value(full_document()).unwrap();
        let source = &list.sources.as_ref().unwrap()[0];
        assert_eq!(source.kind, Some(SourceType::Coingecko));
        assert_eq!(source.extra.get("fetchedAt"), Some(&json!("2025-05-30")));

        let verification = list.verification.as_ref().unwrap();
        assert_eq!(verification.last_audit.as_deref(), Some("2025-05-31"));
        assert_eq!(verification.extra.get("reviewers"), Some(&json!(2)));
    }

    #[test]
    fn attribute_values_are_tagged_variants() {
        let list = TokenListFile::from_value(full_document()).unwrap();
        let attrs = list.tokens[0].attributes.as_ref().unwrap();
        assert_eq!(attrs[0].value, AttributeValue::Text("Stablecoin".to_string()));
        assert!(matches!(attrs[1].value, AttributeValue::Number(ref n) if n.as_u64() == Some(2018)));
        assert_eq!(attrs[1].value.to_string(), "2018");
    }

    #[test]
    fn serialization_uses_wire_names_and_skips_absent_fields() {
        let list = TokenListFile::from_value(full_document()).unwrap();
        let out = serde_json::to_value(&list.tokens[0]).unwrap();
        assert!(out.get("chainId").is_some());
        assert!(out.get("totalSupply").is_some());
        assert!(out.get("logoURI").is_none());
        assert!(out.get("chain_id").is_none());
    }

    #[test]
    fn minimal_document_parses() {
        let list = TokenListFile::from_json_str(r#"{"tokens":[]}"#).unwrap();
        assert!(list.tokens.is_empty());
        assert!(list.tags.is_none());
        assert!(!list.declares_tag("anything"));
    }

    #[test]
    fn unknown_source_type_rejected() {
        let err = TokenListFile::from_value(json!({
            "sources": [{ "name": "x", "type": "rumour" }],
            "tokens": []
        }))
        .unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = TokenListFile::load(Path::new("/nonexistent/tokenlist-core/list.json")).unwrap_err();
        assert!(matches!(err, CoreError::ReadList { .. }));
    }
}
