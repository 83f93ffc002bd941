//! # Logo Asset Checker
//!
//! Every token `image` must point at a local file laid out as
//! `images/<chainId>/<checksummed-address>.<ext>`. The checker verifies, in
//! order, and stops at the first failure:
//!
//! 1. the path (after a leading `./` or `/` is dropped) sits directly in
//!    `images/<chainId>/`;
//! 2. the extension is `png`, `svg`, `jpg` or `jpeg` (any case);
//! 3. the file stem equals the checksummed address, ignoring case;
//! 4. the file exists and is within the size cap for its format;
//! 5. raster logos are square;
//! 6. SVG logos pass the content gate in [`crate::svg`].

use std::path::{Path, PathBuf};

use tokenlist_core::ChecksumAddress;

use crate::error::LogoError;
use crate::svg;

/// Accepted extensions, lowercase, without the dot.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "svg", "jpg", "jpeg"];

/// Directory under the asset root that holds all logos.
pub const IMAGES_DIR: &str = "images";

/// File formats a logo may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogoFormat {
    Png,
    Svg,
    Jpeg,
}

impl LogoFormat {
    /// Map a file extension (any case, no dot) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Maximum file size in bytes.
    pub fn size_limit(self) -> u64 {
        match self {
            Self::Png => 50 * 1024,
            Self::Svg => 25 * 1024,
            Self::Jpeg => 35 * 1024,
        }
    }

    /// True for formats whose pixel dimensions are checked.
    pub fn is_raster(self) -> bool {
        !matches!(self, Self::Svg)
    }
}

/// A logo that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedLogo {
    /// Repo-relative path, normalized.
    pub relative_path: String,
    pub format: LogoFormat,
    pub size: u64,
    /// Width and height; `None` for SVG.
    pub dimensions: Option<(usize, usize)>,
}

/// Resolves logo paths against an asset root and enforces the logo policy.
#[derive(Debug, Clone)]
pub struct LogoChecker {
    asset_root: PathBuf,
}

impl LogoChecker {
    /// `asset_root` is the directory that contains `images/`.
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Check the logo declared as `image` for the token at `checksum` on
    /// `chain_id`.
    pub fn check(
        &self,
        image: &str,
        chain_id: u64,
        checksum: &ChecksumAddress,
    ) -> Result<CheckedLogo, LogoError> {
        let rel = normalize(image);
        let expected_dir = format!("{IMAGES_DIR}/{chain_id}/");
        let expected_any = format!("{expected_dir}{checksum}.<{}>", ALLOWED_EXTENSIONS.join("|"));

        let Some(file_name) = rel.strip_prefix(&expected_dir) else {
            return Err(LogoError::WrongDirectory {
                image: image.to_string(),
                expected_dir,
                expected: expected_any,
            });
        };
        if file_name.contains('/') {
            return Err(LogoError::WrongDirectory {
                image: image.to_string(),
                expected_dir,
                expected: expected_any,
            });
        }

        let file_path = Path::new(file_name);
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let Some(format) = LogoFormat::from_extension(&ext) else {
            return Err(LogoError::DisallowedExtension {
                image: image.to_string(),
                ext: if ext.is_empty() { ext } else { format!(".{ext}") },
                expected: expected_any,
            });
        };

        let stem = file_path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        if !stem.eq_ignore_ascii_case(checksum.as_str()) {
            return Err(LogoError::NameMismatch {
                image: image.to_string(),
                expected: format!("{expected_dir}{checksum}.{ext}"),
            });
        }

        let local = self.asset_root.join(rel);
        let size = file_size(&local, rel)?;
        let limit = format.size_limit();
        if size > limit {
            return Err(LogoError::TooLarge {
                path: rel.to_string(),
                size,
                limit,
            });
        }

        let dimensions = if format.is_raster() {
            Some(check_square(&local, rel)?)
        } else {
            check_svg_content(&local, rel)?;
            None
        };

        tracing::debug!(path = rel, size, ?format, "logo passed");

        Ok(CheckedLogo {
            relative_path: rel.to_string(),
            format,
            size,
            dimensions,
        })
    }
}

/// Drop one leading `./` or `/`.
fn normalize(image: &str) -> &str {
    image
        .strip_prefix("./")
        .or_else(|| image.strip_prefix('/'))
        .unwrap_or(image)
}

fn file_size(local: &Path, rel: &str) -> Result<u64, LogoError> {
    let meta = std::fs::metadata(local).map_err(|e| LogoError::NotFound {
        path: rel.to_string(),
        reason: e.to_string(),
    })?;
    if !meta.is_file() {
        return Err(LogoError::NotFound {
            path: rel.to_string(),
            reason: "not a regular file".to_string(),
        });
    }
    Ok(meta.len())
}

fn check_square(local: &Path, rel: &str) -> Result<(usize, usize), LogoError> {
    let size = imagesize::size(local).map_err(|e| LogoError::UnreadableDimensions {
        path: rel.to_string(),
        reason: e.to_string(),
    })?;
    if size.width == 0 || size.height == 0 {
        return Err(LogoError::UnreadableDimensions {
            path: rel.to_string(),
            reason: format!("zero dimension {}x{}", size.width, size.height),
        });
    }
    if size.width != size.height {
        return Err(LogoError::NotSquare {
            path: rel.to_string(),
            width: size.width,
            height: size.height,
        });
    }
    Ok((size.width, size.height))
}

fn check_svg_content(local: &Path, rel: &str) -> Result<(), LogoError> {
    let bytes = std::fs::read(local).map_err(|e| LogoError::NotFound {
        path: rel.to_string(),
        reason: e.to_string(),
    })?;
    let text = String::from_utf8(bytes).map_err(|_| LogoError::SvgNotText {
        path: rel.to_string(),
    })?;
    match svg::first_violation(&text) {
        Some(rule) => Err(LogoError::Svg {
            path: rel.to_string(),
            rule,
        }),
        None => Ok(()),
    }
}
