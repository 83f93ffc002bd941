//! # tokenlist-cli — Command Line Interface
//!
//! Provides the `tokenlist` binary.
//!
//! ## Subcommands
//!
//! - `tokenlist validate [PATH]` — schema, domain rules and logo checks.
//! - `tokenlist build` — package `dist/` for publication.
//! - `tokenlist lookup --chain <ID>` — query the list from the shell.
//!
//! ```bash
//! tokenlist validate
//! tokenlist -v validate tokens/list.json
//! tokenlist build
//! tokenlist lookup --chain 1 --symbol usdc
//! ```

pub mod config;
pub mod dist;
pub mod lookup;
pub mod validate;

use std::path::{Path, PathBuf};

/// Resolve a path that may be relative to the project root.
///
/// Absolute paths are returned as-is. A relative path that exists under
/// `root` resolves there; otherwise it stays relative to the current
/// directory.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let root_relative = root.join(path);
    if root_relative.exists() {
        root_relative
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_kept() {
        let p = resolve_path(Path::new("/abs/list.json"), Path::new("/repo"));
        assert_eq!(p, PathBuf::from("/abs/list.json"));
    }

    #[test]
    fn existing_root_relative_path_preferred() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("tokens")).unwrap();
        std::fs::write(dir.path().join("tokens/list.json"), "{}").unwrap();
        let p = resolve_path(Path::new("tokens/list.json"), dir.path());
        assert_eq!(p, dir.path().join("tokens/list.json"));
    }

    #[test]
    fn missing_relative_path_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let p = resolve_path(Path::new("nope.json"), dir.path());
        assert_eq!(p, PathBuf::from("nope.json"));
    }
}
