use std::borrow::Borrow;

use tower_lsp::lsp_types;

use crate::vfs::FileId;

/// Canonical (camel-cased) component or directive name.
///
/// Templates refer to `myWidget` as `my-widget`; both spellings collapse to
/// the same value here, and every key in the index goes through it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolName(String);

impl SymbolName {
    /// Normalize `raw` by turning every `-x` (hyphen + ASCII lowercase
    /// letter) into `X`. Idempotent.
    pub fn normalized(raw: &str) -> Self {
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == '-'
                && let Some(&next) = chars.peek()
                && next.is_ascii_lowercase()
            {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
            out.push(ch);
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<str> for SymbolName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymbolName {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which registration call declared the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Component,
    Directive,
}

impl SymbolKind {
    pub(crate) fn from_call(call: &str) -> Self {
        match call {
            "directive" => Self::Directive,
            _ => Self::Component,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Directive => "directive",
        }
    }

    pub fn to_lsp(self) -> lsp_types::SymbolKind {
        match self {
            Self::Component => lsp_types::SymbolKind::CLASS,
            Self::Directive => lsp_types::SymbolKind::FUNCTION,
        }
    }
}

/// 0-based position of a declaration. `column` is in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: FileId,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(
        file: FileId,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            file,
            line,
            column,
        }
    }

    /// Empty LSP range at the declaration start, or `None` when the file id
    /// is neither a URL nor an absolute path.
    pub fn to_lsp(&self) -> Option<lsp_types::Location> {
        let uri = self.file.to_url()?;
        let position = lsp_types::Position::new(self.line, self.column);
        Some(lsp_types::Location {
            uri,
            range: lsp_types::Range::new(position, position),
        })
    }
}

/// One `.component(...)` / `.directive(...)` registration found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: SymbolName,
    pub kind: SymbolKind,
    pub location: Location,
}

#[cfg(test)]
#[path = "../../tests/src/symbols/types_tests.rs"]
mod tests;
