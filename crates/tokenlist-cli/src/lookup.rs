//! # Lookup Subcommand
//!
//! Queries a token list by chain, address, symbol or tag and prints the
//! matching entries as JSON, each with its resolved logo URI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tokenlist_core::{
    logo_uri, token_by_address, token_by_symbol, tokens_by_chain, LogoUriOptions, TokenInfo,
    TokenListFile,
};

use crate::config::ProjectLayout;

/// Arguments for the `tokenlist lookup` subcommand.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// EIP-155 chain id to search.
    #[arg(long)]
    pub chain: u64,

    /// Contract address (any case).
    #[arg(long, conflicts_with = "symbol")]
    pub address: Option<String>,

    /// Token symbol (any case).
    #[arg(long)]
    pub symbol: Option<String>,

    /// Only tokens carrying this tag id.
    #[arg(long)]
    pub tag: Option<String>,

    /// Token list to query (defaults to `tokens/list.json`).
    #[arg(long, value_name = "PATH")]
    pub list: Option<PathBuf>,
}

/// A matched token plus the URI a client would load its logo from.
#[derive(Debug, Serialize)]
pub struct LookupEntry<'a> {
    #[serde(flatten)]
    pub token: &'a TokenInfo,
    #[serde(rename = "resolvedLogoURI", skip_serializing_if = "Option::is_none")]
    pub resolved_logo_uri: Option<String>,
}

/// Execute the lookup subcommand. Exit code 1 when nothing matches.
pub fn run_lookup(args: &LookupArgs, layout: &ProjectLayout) -> Result<u8> {
    let path = match &args.list {
        Some(path) => crate::resolve_path(path, &layout.root),
        None => layout.list.clone(),
    };
    let list = TokenListFile::load(&path)
        .with_context(|| format!("failed to load token list {}", path.display()))?;
    let options = LogoUriOptions::from_env().context("invalid logo URI configuration")?;

    let entries = lookup(&list, args, &options);
    if entries.is_empty() {
        eprintln!("no token matches on chain {}", args.chain);
        return Ok(1);
    }

    let json = serde_json::to_string_pretty(&entries).context("failed to serialize matches")?;
    println!("{json}");
    Ok(0)
}

/// Select tokens per `args`. Address and symbol lookups yield at most one
/// token; without either, every token on the chain is a candidate.
pub fn lookup<'a>(
    list: &'a TokenListFile,
    args: &LookupArgs,
    options: &LogoUriOptions,
) -> Vec<LookupEntry<'a>> {
    let candidates: Vec<&TokenInfo> = if let Some(address) = &args.address {
        token_by_address(list, args.chain, address).into_iter().collect()
    } else if let Some(symbol) = &args.symbol {
        token_by_symbol(list, args.chain, symbol).into_iter().collect()
    } else {
        tokens_by_chain(list, args.chain)
    };

    candidates
        .into_iter()
        .filter(|t| args.tag.as_deref().map_or(true, |tag| t.has_tag(tag)))
        .map(|token| LookupEntry {
            token,
            resolved_logo_uri: logo_uri(token, options),
        })
        .collect()
}
