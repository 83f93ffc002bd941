//! # tokenlist CLI entry point
//!
//! Parses command-line arguments, resolves the project layout and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tokenlist_cli::config::{discover_root, ProjectLayout};
use tokenlist_cli::dist::{run_build, BuildArgs};
use tokenlist_cli::lookup::{run_lookup, LookupArgs};
use tokenlist_cli::validate::{run_validate, ValidateArgs};

/// Token list toolchain
///
/// Validates the curated token list against its JSON Schema, domain rules
/// and logo policy, and packages it for publication.
#[derive(Parser, Debug)]
#[command(name = "tokenlist", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project root (defaults to the nearest ancestor containing
    /// `schema/tokenlist.schema.json`).
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Emit log lines as JSON (for CI log collectors).
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a token list against the schema, domain rules and logo policy.
    Validate(ValidateArgs),

    /// Package the list, schema and logos into the distribution directory.
    Build(BuildArgs),

    /// Look up tokens by chain, address, symbol or tag.
    Lookup(LookupArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!("tokenlist CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let root = cli.root.clone().unwrap_or_else(|| {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        discover_root(&cwd).unwrap_or_else(|| {
            tracing::warn!("Could not locate project root; using current directory");
            cwd
        })
    });
    let layout = ProjectLayout::from_env(root);

    tracing::debug!(root = %layout.root.display(), "resolved project root");

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &layout),
        Commands::Build(args) => run_build(args, &layout),
        Commands::Lookup(args) => run_lookup(args, &layout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn validate_path_is_optional() {
        let cli = Cli::try_parse_from(["tokenlist", "validate"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate(ValidateArgs { path: None })));

        let cli = Cli::try_parse_from(["tokenlist", "-vv", "validate", "other.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Validate(args) => assert_eq!(args.path, Some(PathBuf::from("other.json"))),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn root_flag_is_global() {
        let cli = Cli::try_parse_from(["tokenlist", "build", "--root", "/repo", "--log-json"])
            .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/repo")));
        assert!(cli.log_json);
    }

    #[test]
    fn lookup_rejects_address_with_symbol() {
        let res = Cli::try_parse_from([
            "tokenlist", "lookup", "--chain", "1", "--address", "0x1", "--symbol", "X",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn lookup_requires_chain() {
        assert!(Cli::try_parse_from(["tokenlist", "lookup", "--symbol", "USDC"]).is_err());
    }
}
