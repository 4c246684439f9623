//! HTML to plain text extraction.

use once_cell::sync::Lazy;
use regex::Regex;

/// Extracted content is cut to this many characters (plus an ellipsis).
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Shorter extractions are treated as unusable.
pub const MIN_CONTENT_CHARS: usize = 100;

static SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid regex"));
static STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strips scripts, styles and tags from `html` and collapses whitespace.
///
/// The result is truncated to [`MAX_CONTENT_CHARS`]. This is a coarse
/// extraction: entities are left as-is and no readability heuristics run.
pub fn extract_text(html: &str) -> String {
    let text = SCRIPT.replace_all(html, "");
    let text = STYLE.replace_all(&text, "");
    let text = TAG.replace_all(&text, " ");
    let text = SPACE.replace_all(&text, " ");
    truncate_chars(text.trim(), MAX_CONTENT_CHARS)
}

/// Cuts `s` to `max` characters, appending `...` when anything was cut.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
