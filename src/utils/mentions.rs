use once_cell::sync::Lazy;
use regex::Regex;

static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([A-Za-z0-9_-]{3,30})").expect("valid mention regex"));

/// Unique, lower-cased `@handles` in order of first appearance.
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut mentions: Vec<String> = Vec::new();
    for cap in MENTION.captures_iter(text) {
        let handle = cap[1].to_lowercase();
        if !mentions.contains(&handle) {
            mentions.push(handle);
        }
    }
    mentions
}
