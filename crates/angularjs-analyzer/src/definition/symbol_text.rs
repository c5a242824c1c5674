use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::Position;

use crate::text_pos::{line_at, utf16_column_of_byte_offset};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_-]+").expect("word pattern must compile"));

/// Token under `column` (UTF-16) in `line`.
///
/// Tokens are maximal runs of ASCII word characters and hyphens. A token
/// spanning `start..end` is selected when `start <= column <= end`, so a
/// cursor just past the last character still hits it. The first such token
/// wins; no match yields `""`.
pub fn word_at(
    line: &str,
    column: u32,
) -> &str {
    for word in WORD_RE.find_iter(line) {
        let start = utf16_column_of_byte_offset(line, word.start());
        if start > column {
            break;
        }
        let end = utf16_column_of_byte_offset(line, word.end());
        if column <= end {
            return word.as_str();
        }
    }
    ""
}

/// [`word_at`] on the line of `text` that `position` points into.
pub fn word_at_position(
    text: &str,
    position: Position,
) -> &str {
    line_at(text, position.line).map_or("", |line| word_at(line, position.character))
}

#[cfg(test)]
#[path = "../../tests/src/definition/symbol_text_tests.rs"]
mod tests;
