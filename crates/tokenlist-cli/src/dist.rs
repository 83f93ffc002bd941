//! # Build Subcommand
//!
//! Packages the publishable tree:
//!
//! ```text
//! dist/
//!   tokenlist.json                 copy of the token list
//!   schema/tokenlist.schema.json   the list schema, nothing else from schema/
//!   images/...                     recursive copy of the logo tree
//! ```
//!
//! The output directory is removed and rebuilt on every run. Nothing is
//! validated here; run `validate` first.

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use tokenlist_schema::TOKENLIST_SCHEMA;

use crate::config::ProjectLayout;

/// File name of the list inside the output tree.
pub const DIST_LIST_NAME: &str = "tokenlist.json";

/// Arguments for the `tokenlist build` subcommand.
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Output directory (defaults to `dist/` under the project root).
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistReport {
    pub out_dir: PathBuf,
    pub files_copied: usize,
    pub images_included: bool,
}

/// Execute the build subcommand.
pub fn run_build(args: &BuildArgs, layout: &ProjectLayout) -> Result<u8> {
    let out_dir = match &args.out {
        Some(out) => crate::resolve_path(out, &layout.root),
        None => layout.dist_dir.clone(),
    };
    let report = build_dist(layout, &out_dir)?;
    println!(
        "Built {} ({} files{})",
        report.out_dir.display(),
        report.files_copied,
        if report.images_included { ", images included" } else { "" }
    );
    Ok(0)
}

/// Rebuild `out_dir` from the list, schema and images in `layout`.
pub fn build_dist(layout: &ProjectLayout, out_dir: &Path) -> Result<DistReport> {
    check_output_dir(layout, out_dir)?;

    if out_dir.exists() {
        std::fs::remove_dir_all(out_dir)
            .with_context(|| format!("failed to remove {}", out_dir.display()))?;
    }
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut files_copied = 0usize;

    copy_file(&layout.list, &out_dir.join(DIST_LIST_NAME))?;
    files_copied += 1;

    let schema_out = out_dir.join("schema");
    std::fs::create_dir_all(&schema_out)
        .with_context(|| format!("failed to create {}", schema_out.display()))?;
    copy_file(&layout.schema_file(), &schema_out.join(TOKENLIST_SCHEMA))?;
    files_copied += 1;

    let images_included = if layout.images_dir.is_dir() {
        files_copied += copy_dir_recursive(&layout.images_dir, &out_dir.join("images"))?;
        true
    } else {
        tracing::warn!(
            dir = %layout.images_dir.display(),
            "images directory not found; building without logos"
        );
        false
    };

    tracing::info!(out = %out_dir.display(), files_copied, images_included, "distribution built");

    Ok(DistReport {
        out_dir: out_dir.to_path_buf(),
        files_copied,
        images_included,
    })
}

/// Refuse an output directory that would remove or swallow project sources:
/// one that equals or contains the root, list, schema dir or images dir, or
/// one nested inside the images dir.
fn check_output_dir(layout: &ProjectLayout, out_dir: &Path) -> Result<()> {
    let out = normalize(out_dir)?;
    let images = normalize(&layout.images_dir)?;

    for source in [&layout.root, &layout.list, &layout.schema_dir, &layout.images_dir] {
        if normalize(source)?.starts_with(&out) {
            bail!(
                "refusing to use {} as output directory: it contains {}",
                out_dir.display(),
                source.display()
            );
        }
    }
    if out.starts_with(&images) {
        bail!(
            "refusing to use {} as output directory: it is inside the images directory {}",
            out_dir.display(),
            layout.images_dir.display()
        );
    }
    Ok(())
}

/// Absolute form of `path` with `.` and `..` resolved and symlinks followed
/// for the longest prefix that exists.
fn normalize(path: &Path) -> Result<PathBuf> {
    let components: Vec<Component<'_>> = path.components().collect();

    for split in (0..=components.len()).rev() {
        let mut resolved = if split == 0 {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            std::fs::canonicalize(&cwd)
                .with_context(|| format!("failed to resolve {}", cwd.display()))?
        } else {
            let prefix: PathBuf = components[..split].iter().collect();
            match std::fs::canonicalize(&prefix) {
                Ok(resolved) => resolved,
                Err(_) => continue,
            }
        };
        for component in &components[split..] {
            match component {
                Component::ParentDir => {
                    resolved.pop();
                }
                Component::CurDir => {}
                other => resolved.push(other),
            }
        }
        return Ok(resolved);
    }
    bail!("failed to resolve {}", path.display())
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    std::fs::copy(from, to)
        .with_context(|| format!("failed to copy {} to {}", from.display(), to.display()))?;
    Ok(())
}

/// Copy `src` into `dst`, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize> {
    std::fs::create_dir_all(dst).with_context(|| format!("failed to create {}", dst.display()))?;

    let mut entries = std::fs::read_dir(src)
        .with_context(|| format!("failed to read {}", src.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to list {}", src.display()))?;
    entries.sort_by_key(|e| e.file_name());

    let mut copied = 0usize;
    for entry in entries {
        let path = entry.path();
        let target = dst.join(entry.file_name());
        if path.is_dir() {
            copied += copy_dir_recursive(&path, &target)?;
        } else {
            copy_file(&path, &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
