use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent};

/// Text and version of one open document.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub version: i32,
    /// Byte offset of every line start, rebuilt on each mutation.
    line_offsets: Vec<usize>,
}

impl Document {
    pub fn new(
        text: String,
        version: i32,
    ) -> Self {
        let line_offsets = line_offsets(&text);
        Self {
            text,
            version,
            line_offsets,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Byte offset of an LSP position (UTF-16 columns). Columns past the end
    /// of the line clamp to the line end.
    pub fn offset_of(
        &self,
        pos: Position,
    ) -> Option<usize> {
        let line = pos.line as usize;
        let line_start = *self.line_offsets.get(line)?;
        let line_end = self.line_offsets.get(line + 1).copied().unwrap_or(self.text.len());

        let mut units = 0u32;
        let mut offset = line_start;
        for ch in self.text[line_start..line_end].chars() {
            if units >= pos.character || ch == '\n' {
                break;
            }
            units += ch.len_utf16() as u32;
            offset += ch.len_utf8();
        }
        Some(offset)
    }

    pub fn set_content(
        &mut self,
        text: String,
        version: i32,
    ) {
        self.text = text;
        self.version = version;
        self.line_offsets = line_offsets(&self.text);
    }

    /// Apply edits in order. A ranged edit whose positions fall outside the
    /// document is ignored; an edit without a range replaces everything.
    pub fn apply_changes(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) {
        for change in changes {
            match change.range {
                Some(range) => {
                    if let (Some(start), Some(end)) = (self.offset_of(range.start), self.offset_of(range.end))
                        && start <= end
                    {
                        self.text.replace_range(start..end, &change.text);
                    }
                },
                None => self.text = change.text,
            }
            self.line_offsets = line_offsets(&self.text);
        }
        self.version = version;
    }
}

fn line_offsets(text: &str) -> Vec<usize> {
    std::iter::once(0).chain(text.match_indices('\n').map(|(idx, _)| idx + 1)).collect()
}

#[cfg(test)]
#[path = "../../tests/src/document/text_document_tests.rs"]
mod tests;
