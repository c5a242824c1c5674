use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    symbols::types::{Declaration, Location, SymbolKind, SymbolName},
    text_pos::utf16_column_of_byte_offset,
    vfs::FileId,
};

static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\.(component|directive)\(\s*['"]([^'"]+)['"]"#).expect("declaration pattern must compile")
});

/// Lazily scan `text` for component and directive registrations.
///
/// The returned iterator is cheap to clone; cloning it before consuming
/// restarts the scan. Text without registrations yields nothing.
pub fn scan_declarations<'a>(
    file: &'a FileId,
    text: &'a str,
) -> Declarations<'a> {
    Declarations {
        file,
        text,
        cursor: 0,
        line: 0,
        line_start: 0,
        counted_to: 0,
    }
}

#[derive(Debug, Clone)]
pub struct Declarations<'a> {
    file: &'a FileId,
    text: &'a str,
    /// Where the next regex search starts (end of the previous match).
    cursor: usize,
    line: u32,
    line_start: usize,
    /// Newlines before this byte offset are already folded into `line`.
    counted_to: usize,
}

impl Declarations<'_> {
    fn advance_lines_to(
        &mut self,
        offset: usize,
    ) {
        let base = self.counted_to;
        for (idx, _) in self.text[base..offset].match_indices('\n') {
            self.line += 1;
            self.line_start = base + idx + 1;
        }
        self.counted_to = offset;
    }
}

impl Iterator for Declarations<'_> {
    type Item = Declaration;

    fn next(&mut self) -> Option<Declaration> {
        let captures = DECLARATION_RE.captures_at(self.text, self.cursor)?;
        let whole = captures.get(0)?;
        let raw_name = captures.get(2)?.as_str();
        let kind = SymbolKind::from_call(captures.get(1).map_or("", |m| m.as_str()));
        self.cursor = whole.end();

        let start = whole.start();
        self.advance_lines_to(start);
        let column = utf16_column_of_byte_offset(&self.text[self.line_start..], start - self.line_start);

        Some(Declaration {
            name: SymbolName::normalized(raw_name),
            kind,
            location: Location::new(self.file.clone(), self.line, column),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/scanner_tests.rs"]
mod tests;
