use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid space regex"));

pub const EXCERPT_MAX_LEN: usize = 200;
const WORDS_PER_MINUTE: usize = 200;

fn strip_tags(content: &str) -> String {
    HTML_TAG.replace_all(content, "").into_owned()
}

/// Plain-text preview of `content`, cut on a word boundary.
pub fn generate_excerpt(content: &str, max_len: usize) -> String {
    let plain = strip_tags(content);
    let cleaned = WHITESPACE.replace_all(&plain, " ");
    let cleaned = cleaned.trim();

    if cleaned.chars().count() <= max_len {
        return cleaned.to_string();
    }

    let truncated: String = cleaned.chars().take(max_len).collect();
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &truncated[..last_space]),
        None => format!("{truncated}..."),
    }
}

/// Estimated reading time in minutes, never less than one.
pub fn reading_time(content: &str) -> i64 {
    let words = strip_tags(content).split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as i64
}
