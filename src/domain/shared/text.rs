use html2text::from_read;
use regex::Regex;
use std::sync::OnceLock;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"https?://[^\s]+").expect("url pattern is valid"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Clean text for narration: HTML to plain text, URLs removed, whitespace
/// collapsed to single spaces
pub fn clean_text(text: &str) -> String {
    let plain_text = from_read(text.as_bytes(), usize::MAX);
    let without_urls = url_pattern().replace_all(&plain_text, "");
    let normalized = whitespace_pattern().replace_all(&without_urls, " ");

    normalized.trim().to_string()
}
