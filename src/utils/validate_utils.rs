use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9][\w-]{0,29}$").expect("valid tag regex"));

pub fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

pub fn validate_not_blank(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Must not be blank".into()));
    }
    Ok(())
}

/// Blank tags are allowed here, they are dropped by [`normalize_tags`].
pub fn validate_tags(tags: &Vec<String>) -> Result<(), ValidationError> {
    for tag in tags {
        let trimmed = tag.trim();
        if !trimmed.is_empty() && !TAG.is_match(trimmed) {
            return Err(ValidationError::new("invalid_tags")
                .with_message("Tag contains forbidden symbol".into()));
        }
    }
    Ok(())
}

pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_tags() {
        let tags = vec![" Rust ".to_string(), "".to_string(), "rust".to_string(), "Web".to_string()];
        assert_eq!(normalize_tags(tags), vec!["rust".to_string(), "web".to_string()]);
    }

    #[test]
    fn rejects_tags_with_symbols() {
        assert!(validate_tags(&vec!["ok_tag".to_string(), "  ".to_string()]).is_ok());
        assert!(validate_tags(&vec!["no way".to_string()]).is_err());
        assert!(validate_tags(&vec!["#hash".to_string()]).is_err());
    }

    #[test]
    fn blank_content_is_invalid() {
        assert!(validate_not_blank(&"  \n".to_string()).is_err());
        assert!(validate_not_blank(&" x ".to_string()).is_ok());
    }
}
