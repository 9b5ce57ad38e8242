use scraper::{ElementRef, Selector};

/// Parses a CSS selector, keeping the parse error readable.
pub fn selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("invalid selector {css:?}: {e:?}"))
}

/// Text of `node` with every text fragment trimmed and blank fragments
/// dropped, joined without a separator.
pub fn extract_text(node: ElementRef) -> String {
    node.text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<String>()
}

/// Cuts `text` to `max_chars` characters, marking the cut with "...".
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}
