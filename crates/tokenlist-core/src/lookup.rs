//! # Lookup Helpers
//!
//! Side-effect-free queries over a loaded, validated [`TokenListFile`], and
//! the logo URI builder used by consumers that only have repo-relative
//! `image` paths.
//!
//! Address and symbol comparisons ignore ASCII case; chain ids must match
//! exactly. Symbol uniqueness per chain is enforced by the domain rules, but
//! [`token_by_symbol`] still returns the first match rather than assume it.

use url::Url;

use crate::error::CoreError;
use crate::model::{TokenInfo, TokenListFile};

/// npm package the list is published under.
pub const DEFAULT_PACKAGE_NAME: &str = "@xrise33/token-list";

/// Package version or dist-tag used when none is configured.
pub const DEFAULT_PACKAGE_VERSION: &str = "latest";

/// jsDelivr npm endpoint; `<package>@<version>` and the image path are appended.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.jsdelivr.net/npm";

/// All tokens on `chain_id`, in document order.
pub fn tokens_by_chain(list: &TokenListFile, chain_id: u64) -> Vec<&TokenInfo> {
    list.tokens.iter().filter(|t| t.chain_id == chain_id).collect()
}

/// The token at `address` on `chain_id`, comparing addresses case-insensitively.
pub fn token_by_address<'a>(
    list: &'a TokenListFile,
    chain_id: u64,
    address: &str,
) -> Option<&'a TokenInfo> {
    list.tokens
        .iter()
        .find(|t| t.chain_id == chain_id && t.address.eq_ignore_ascii_case(address))
}

/// The first token with `symbol` on `chain_id`, comparing symbols case-insensitively.
pub fn token_by_symbol<'a>(
    list: &'a TokenListFile,
    chain_id: u64,
    symbol: &str,
) -> Option<&'a TokenInfo> {
    let wanted = symbol.to_uppercase();
    list.tokens
        .iter()
        .find(|t| t.chain_id == chain_id && t.symbol.to_uppercase() == wanted)
}

/// All tokens carrying `tag_id`, in document order.
pub fn tokens_by_tag<'a>(list: &'a TokenListFile, tag_id: &str) -> Vec<&'a TokenInfo> {
    list.tokens.iter().filter(|t| t.has_tag(tag_id)).collect()
}

/// Where logo URIs built from `image` paths should point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoUriOptions {
    /// npm package name, used by the default CDN base.
    pub package_name: String,
    /// Package version or dist-tag, used by the default CDN base.
    pub version: String,
    /// Replaces the whole base (e.g. a self-hosted mirror). When set,
    /// `package_name` and `version` are ignored.
    pub base_uri_override: Option<String>,
}

impl Default for LogoUriOptions {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            version: DEFAULT_PACKAGE_VERSION.to_string(),
            base_uri_override: None,
        }
    }
}

impl LogoUriOptions {
    /// Load options from the process environment.
    ///
    /// Variables:
    /// - `TOKENLIST_PACKAGE_NAME` (default: `@xrise33/token-list`)
    /// - `TOKENLIST_PACKAGE_VERSION` (default: `latest`)
    /// - `TOKENLIST_CDN_BASE` (optional; must be an absolute URL)
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let defaults = Self::default();

        let base_uri_override = match var("TOKENLIST_CDN_BASE") {
            Some(raw) if !raw.trim().is_empty() => {
                Url::parse(raw.trim()).map_err(|e| CoreError::InvalidConfig {
                    key: "TOKENLIST_CDN_BASE".to_string(),
                    reason: e.to_string(),
                })?;
                Some(raw.trim().to_string())
            }
            _ => None,
        };

        Ok(Self {
            package_name: var("TOKENLIST_PACKAGE_NAME").unwrap_or(defaults.package_name),
            version: var("TOKENLIST_PACKAGE_VERSION").unwrap_or(defaults.version),
            base_uri_override,
        })
    }

    /// Replace the base URI.
    pub fn with_base_override(mut self, base: impl Into<String>) -> Self {
        self.base_uri_override = Some(base.into());
        self
    }

    /// The base that image paths are joined onto, without a trailing slash.
    pub fn base(&self) -> String {
        match &self.base_uri_override {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!(
                "{DEFAULT_CDN_BASE}/{}@{}",
                self.package_name, self.version
            ),
        }
    }
}

/// Resolve a displayable logo URI for `token`.
///
/// An explicit `logoURI` wins. Otherwise the repo-relative `image` path
/// (with a single leading `/` removed) is appended to the configured base.
/// Returns `None` when the token has neither field.
pub fn logo_uri(token: &TokenInfo, options: &LogoUriOptions) -> Option<String> {
    if let Some(uri) = &token.logo_uri {
        return Some(uri.clone());
    }
    let image = token.image.as_deref()?;
    let path = image.strip_prefix('/').unwrap_or(image);
    Some(format!("{}/{path}", options.base()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn sample_list() -> TokenListFile {
        TokenListFile::from_value(json!({
            "tags": { "stablecoin": { "name": "Stablecoin" } },
            "tokens": [
                {
                    "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
                    "chainId": 1, "symbol": "USDC", "decimals": 6,
                    "tags": ["stablecoin"],
                    "image": "images/1/0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48.svg"
                },
                {
                    "address": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
                    "chainId": 1, "symbol": "WETH", "decimals": 18,
                    "logoURI": "https://assets.example.org/weth.png",
                    "image": "images/1/0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2.png"
                },
                {
                    "address": "0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85",
                    "chainId": 10, "symbol": "USDC", "decimals": 6,
                    "tags": ["stablecoin"]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn tokens_by_chain_filters_exactly() {
        let list = sample_list();
        assert_eq!(tokens_by_chain(&list, 1).len(), 2);
        assert_eq!(tokens_by_chain(&list, 10).len(), 1);
        assert!(tokens_by_chain(&list, 56).is_empty());
    }

    #[test]
    fn token_by_address_round_trips_every_token() {
        let list = sample_list();
        for token in &list.tokens {
            let lower = token.address.to_lowercase();
            let found = token_by_address(&list, token.chain_id, &lower).unwrap();
            assert_eq!(found, token);
        }
    }

    #[test]
    fn token_by_address_requires_matching_chain() {
        let list = sample_list();
        assert!(token_by_address(&list, 10, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").is_none());
        assert!(token_by_address(&list, 1, "0x0000000000000000000000000000000000000000").is_none());
    }

    #[test]
    fn token_by_symbol_ignores_case() {
        let list = sample_list();
        let weth = token_by_symbol(&list, 1, "weth").unwrap();
        assert_eq!(weth.decimals, 18);
        let usdc_op = token_by_symbol(&list, 10, "Usdc").unwrap();
        assert_eq!(usdc_op.chain_id, 10);
        assert!(token_by_symbol(&list, 10, "WETH").is_none());
    }

    #[test]
    fn tokens_by_tag_spans_chains() {
        let list = sample_list();
        let stable = tokens_by_tag(&list, "stablecoin");
        assert_eq!(stable.len(), 2);
        assert!(tokens_by_tag(&list, "meme").is_empty());
    }

    #[test]
    fn logo_uri_prefers_explicit_field() {
        let list = sample_list();
        let uri = logo_uri(&list.tokens[1], &LogoUriOptions::default()).unwrap();
        assert_eq!(uri, "https://assets.example.org/weth.png");
    }

    #[test]
    fn logo_uri_builds_default_cdn_url_from_image() {
        let list = sample_list();
        let uri = logo_uri(&list.tokens[0], &LogoUriOptions::default()).unwrap();
        assert_eq!(
            uri,
            "https://cdn.jsdelivr.net/npm/@xrise33/token-list@latest/images/1/0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48.svg"
        );
        assert!(uri.ends_with(list.tokens[0].image.as_deref().unwrap()));
    }

    #[test]
    fn logo_uri_honours_override_and_strips_slashes() {
        let mut token = sample_list().tokens[0].clone();
        token.image = Some("/images/1/logo.svg".to_string());
        let opts = LogoUriOptions::default().with_base_override("https://cdn.example.org/list/1.0.0/");
        assert_eq!(
            logo_uri(&token, &opts).unwrap(),
            "https://cdn.example.org/list/1.0.0/images/1/logo.svg"
        );
    }

    #[test]
    fn logo_uri_none_without_image_or_logo() {
        let list = sample_list();
        assert!(logo_uri(&list.tokens[2], &LogoUriOptions::default()).is_none());
    }

    #[test]
    fn options_from_vars_reads_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TOKENLIST_PACKAGE_NAME", "my-list"),
            ("TOKENLIST_PACKAGE_VERSION", "2.1.0"),
        ]
        .into_iter()
        .collect();
        let opts = LogoUriOptions::from_vars(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(opts.base(), "https://cdn.jsdelivr.net/npm/my-list@2.1.0");
    }

    #[test]
    fn options_from_vars_rejects_relative_base() {
        let err = LogoUriOptions::from_vars(|k| {
            (k == "TOKENLIST_CDN_BASE").then(|| "cdn/relative".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig { ref key, .. } if key == "TOKENLIST_CDN_BASE"));
    }
}
