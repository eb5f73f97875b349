//! 文本工具

/// 按空白切分后的单词数
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 超过 `max_chars` 个字符时截断并追加 `...`，空文本显示 `N/A`
pub fn truncate(text: Option<&str>, max_chars: usize) -> String {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return "N/A".to_string();
    };
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_whitespace_delimited_tokens() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count(" road  trip\nto\tthe coast "), 5);
    }

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate(Some("short"), 80), "short");
        assert_eq!(truncate(Some("abcdef"), 3), "abc...");
        assert_eq!(truncate(Some("ééééé"), 2), "éé...");
        assert_eq!(truncate(None, 10), "N/A");
        assert_eq!(truncate(Some(""), 10), "N/A");
    }
}
