//! # SVG Content Gate
//!
//! Logos are rendered by wallets and explorers, often inline. An SVG can
//! carry script, event handlers, SMIL animation, embedded raster payloads
//! and remote fetches; none of these belong in a token logo. This module
//! scans the raw markup for each of them.
//!
//! Matching is textual and case-insensitive. It does not parse XML, so a
//! forbidden construct inside a comment or CDATA section is still rejected.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT: Lazy<Regex> = Lazy::new(|| compile(r"(?i)<script[\s>/]"));

// `on<letters>=` starting a name: anything but a word character may precede
// it, so namespaced `ev:onload=` matches and `version=` never does.
static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| compile(r"(?i)(?:^|[^a-z0-9_])on[a-z]+\s*="));

static ANIMATION: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)<(?:animate|animateTransform|animateMotion|set)\b"));

static EMBEDDED_RASTER: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)data:image/[a-z0-9.+-]+;base64,"));

static REMOTE_IMAGE: Lazy<Regex> =
    Lazy::new(|| compile(r#"(?i)<image\b[^>]*?(?:xlink:)?href\s*=\s*["']\s*http"#));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static SVG pattern is valid")
}

/// A forbidden SVG construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SvgRule {
    /// `<script>` element.
    Script,
    /// Inline `on*=` event handler attribute.
    EventHandler,
    /// SMIL `<animate*>` or `<set>` element.
    Animation,
    /// `data:image/...;base64,` URI.
    EmbeddedRaster,
    /// `<image>` whose `href`/`xlink:href` starts with `http`.
    RemoteImage,
}

impl SvgRule {
    /// Every rule, in the order they are checked.
    pub const ALL: [SvgRule; 5] = [
        SvgRule::Script,
        SvgRule::EventHandler,
        SvgRule::Animation,
        SvgRule::EmbeddedRaster,
        SvgRule::RemoteImage,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Script => &SCRIPT,
            Self::EventHandler => &EVENT_HANDLER,
            Self::Animation => &ANIMATION,
            Self::EmbeddedRaster => &EMBEDDED_RASTER,
            Self::RemoteImage => &REMOTE_IMAGE,
        }
    }

    /// True if `svg` contains this construct.
    pub fn matches(self, svg: &str) -> bool {
        self.pattern().is_match(svg)
    }
}

impl fmt::Display for SvgRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Script => "must not contain <script> tags",
            Self::EventHandler => "must not contain inline event handlers (on* attributes)",
            Self::Animation => "must not be animated",
            Self::EmbeddedRaster => "must not embed base64 images",
            Self::RemoteImage => "must not load external HTTP(S) images",
        })
    }
}

/// The first rule `svg` violates, if any.
pub fn first_violation(svg: &str) -> Option<SvgRule> {
    SvgRule::ALL.into_iter().find(|rule| rule.matches(svg))
}
