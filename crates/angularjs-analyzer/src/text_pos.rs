/// Number of UTF-16 code units in `line[..byte_offset]`.
///
/// LSP positions count columns in UTF-16 units, so every column the server
/// reports or accepts goes through this conversion.
pub fn utf16_column_of_byte_offset(
    line: &str,
    byte_offset: usize,
) -> u32 {
    line[..byte_offset.min(line.len())].encode_utf16().count() as u32
}

/// Text of the 0-based `line` without its line terminator.
pub fn line_at(
    source: &str,
    line: u32,
) -> Option<&str> {
    let text = source.split('\n').nth(line as usize)?;
    Some(text.strip_suffix('\r').unwrap_or(text))
}

#[cfg(test)]
#[path = "../tests/src/text_pos_tests.rs"]
mod tests;
