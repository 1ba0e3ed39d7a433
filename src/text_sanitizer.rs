use once_cell::sync::Lazy;
use regex::Regex;

// @module: Cue text sanitization

// @const: Inline timing marker regex, e.g. <00:04:33.759>
static INLINE_TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\d{2}:\d{2}:\d{2}\.\d{3}>").unwrap()
});

// @const: Cue styling tag regex, <c> and </c>
static CUE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?c>").unwrap()
});

// @const: Any remaining angle-bracket tag
static ANY_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>").unwrap()
});

// @const: Whitespace run regex
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

/// Strip caption markup from raw cue text and normalize its whitespace.
///
/// Auto-generated tracks carry inline timing markers, `<c>` styling spans
/// and HTML-escaped characters inside the cue payload. The order of the
/// transformations matters: tags are removed before entities are decoded so
/// that decoded `<`/`>` characters are never mistaken for markup.
pub fn sanitize(raw: &str) -> String {
    let text = INLINE_TIMING_REGEX.replace_all(raw, "");
    let text = CUE_TAG_REGEX.replace_all(&text, "");
    let text = ANY_TAG_REGEX.replace_all(&text, "");

    // Entity decoding happens only after every tag span is gone
    let text = text
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");

    WHITESPACE_REGEX.replace_all(&text, " ").trim().to_string()
}
