//! Core types used throughout the project.

use tower_lsp::lsp_types;

/// A range in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl From<SourceRange> for lsp_types::Range {
    fn from(range: SourceRange) -> Self {
        Self { start: range.start.into(), end: range.end.into() }
    }
}

/// A position in source code (0-indexed, UTF-16 columns as in LSP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl From<lsp_types::Position> for SourcePosition {
    fn from(position: lsp_types::Position) -> Self {
        Self { line: position.line, character: position.character }
    }
}

impl From<SourcePosition> for lsp_types::Position {
    fn from(position: SourcePosition) -> Self {
        Self { line: position.line, character: position.character }
    }
}

/// Byte span of one match inside a document's raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    /// Converts the byte span into an LSP-style range over `text`.
    #[must_use]
    pub fn to_range(self, text: &str) -> SourceRange {
        SourceRange { start: offset_to_position(text, self.start), end: offset_to_position(text, self.end) }
    }
}

/// Returns the text of line `position.line` up to the cursor.
///
/// The cursor column is counted in UTF-16 code units. A column past the end of
/// the line yields the whole line; a line past the end of the text yields `None`.
#[must_use]
pub fn line_prefix(text: &str, position: SourcePosition) -> Option<&str> {
    let line = text.split('\n').nth(position.line as usize)?;
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut units = 0_usize;
    for (byte_index, ch) in line.char_indices() {
        if units >= position.character as usize {
            return line.get(..byte_index);
        }
        units += ch.len_utf16();
    }

    Some(line)
}

/// Converts a byte offset into a line/UTF-16 column position.
///
/// Offsets past the end clamp to the end of the text; offsets inside a multi-byte
/// character snap back to the start of that character.
#[must_use]
pub fn offset_to_position(text: &str, offset: usize) -> SourcePosition {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let before = text.get(..offset).unwrap_or_default();
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |index| index + 1);
    let character = before.get(line_start..).unwrap_or_default().encode_utf16().count();

    #[allow(clippy::cast_possible_truncation)] // Documents won't exceed u32::MAX lines or columns
    SourcePosition { line: line as u32, character: character as u32 }
}
