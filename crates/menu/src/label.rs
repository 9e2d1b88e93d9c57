//! Menu label derivation from raw clipboard content.

/// Maximum label width in characters, ellipsis included.
pub const LABEL_MAX_CHARS: usize = 50;

/// Render an entry's content as a single menu line: truncated to
/// [`LABEL_MAX_CHARS`] with a `...` marker when longer, newlines and tabs
/// collapsed to spaces.
pub fn menu_label(content: &str) -> String {
    let truncated: String = if content.chars().count() > LABEL_MAX_CHARS {
        content
            .chars()
            .take(LABEL_MAX_CHARS - 3)
            .chain("...".chars())
            .collect()
    } else {
        content.to_string()
    };
    truncated.replace('\n', " ").replace('\t', " ")
}
