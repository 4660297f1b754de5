// Text normalization — markup stripping and whitespace canonicalization.
//
// Body text arrives as whatever the CMS stored: HTML, Markdown, or plain
// text. We treat it as opaque text to be flattened, not parsed — tags are
// replaced with spaces so adjacent words don't fuse, and everything that
// isn't a word character ends up as a single space.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));
static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").expect("newline pattern"));
static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("non-word pattern"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Flatten raw title/body text into lowercase space-separated words.
///
/// Never fails: any input, including the empty string, yields a string
/// (possibly empty).
pub fn normalize(text: &str) -> String {
    let untagged = TAG_RE.replace_all(text, " ");
    let unbroken = LINE_BREAK_RE.replace_all(&untagged, " ");
    let words_only = NON_WORD_RE.replace_all(&unbroken, " ");
    let lowered = words_only.to_lowercase();
    WHITESPACE_RE.replace_all(&lowered, " ").trim().to_string()
}
