#[cfg(test)]
#[path = "title_test.rs"]
mod tests;

use crate::config::constants::{TITLE_ELLIPSIS, TITLE_MAX_CHARS};

/// Derives a conversation title from the first user message. Counts
/// characters, not bytes, so multi-byte text never splits mid-char.
pub fn derive_title(message: &str) -> String {
    let mut chars = message.chars();
    let title: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{}{}", title, TITLE_ELLIPSIS)
    } else {
        title
    }
}
