//! # Project Layout
//!
//! Where the list, schema, logos and distribution tree live. Every path
//! defaults to a location under the project root and can be moved with an
//! environment variable:
//!
//! | Path        | Default                        | Variable               |
//! |-------------|--------------------------------|------------------------|
//! | list        | `tokens/list.json`             | `TOKENLIST_LIST`       |
//! | schema dir  | `schema/`                      | `TOKENLIST_SCHEMA_DIR` |
//! | images dir  | `images/`                      | `TOKENLIST_IMAGES_DIR` |
//! | dist dir    | `dist/`                        | `TOKENLIST_DIST_DIR`   |
//!
//! Relative overrides are taken relative to the project root.

use std::path::{Path, PathBuf};

use tokenlist_schema::TOKENLIST_SCHEMA;

pub const DEFAULT_LIST: &str = "tokens/list.json";
pub const DEFAULT_SCHEMA_DIR: &str = "schema";
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Resolved project paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub list: PathBuf,
    pub schema_dir: PathBuf,
    pub images_dir: PathBuf,
    pub dist_dir: PathBuf,
}

impl ProjectLayout {
    /// Default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            list: root.join(DEFAULT_LIST),
            schema_dir: root.join(DEFAULT_SCHEMA_DIR),
            images_dir: root.join(DEFAULT_IMAGES_DIR),
            dist_dir: root.join(DEFAULT_DIST_DIR),
            root,
        }
    }

    /// Layout under `root` with overrides from the process environment.
    pub fn from_env(root: impl Into<PathBuf>) -> Self {
        Self::from_vars(root, |key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_vars(root: impl Into<PathBuf>, var: impl Fn(&str) -> Option<String>) -> Self {
        let mut layout = Self::new(root);
        let pick = |key: &str, default: PathBuf, root: &Path| match var(key) {
            Some(raw) if !raw.trim().is_empty() => {
                let path = PathBuf::from(raw.trim());
                tracing::debug!(key, path = %path.display(), "layout override");
                if path.is_absolute() {
                    path
                } else {
                    root.join(path)
                }
            }
            _ => default,
        };
        layout.list = pick("TOKENLIST_LIST", layout.list, &layout.root);
        layout.schema_dir = pick("TOKENLIST_SCHEMA_DIR", layout.schema_dir, &layout.root);
        layout.images_dir = pick("TOKENLIST_IMAGES_DIR", layout.images_dir, &layout.root);
        layout.dist_dir = pick("TOKENLIST_DIST_DIR", layout.dist_dir, &layout.root);
        layout
    }

    /// Path of the token list schema file.
    pub fn schema_file(&self) -> PathBuf {
        self.schema_dir.join(TOKENLIST_SCHEMA)
    }

    /// Directory that logo `image` paths (`images/<chain>/...`) are
    /// resolved against: the parent of the images directory.
    pub fn asset_root(&self) -> &Path {
        self.images_dir.parent().unwrap_or(&self.root)
    }
}

/// Walk up from `start` to the first directory holding
/// `schema/tokenlist.schema.json`.
pub fn discover_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(DEFAULT_SCHEMA_DIR).join(TOKENLIST_SCHEMA).is_file())
        .map(Path::to_path_buf)
}
