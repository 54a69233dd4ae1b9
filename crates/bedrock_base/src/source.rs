//! Per-file byte buffers and the span-to-line/column service.

use crate::intern::Symbol;
use crate::span::Span;

/// Identifies a file within a [`SourceSet`]. `0` never addresses a real
/// file; the first file registered receives `FileId(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

impl FileId {
    pub const NONE: FileId = FileId(0);

    pub fn is_none(self) -> bool {
        self == FileId::NONE
    }
}

/// One loaded file: its canonical path (as an interned symbol) and its
/// immutable byte buffer.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: Symbol,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn slice(&self, span: Span) -> &[u8] {
        &self.bytes[span.start..span.end]
    }

    /// Computes the zero-indexed (line, column) of a byte offset by
    /// scanning from the start of the buffer. Callers that need this
    /// repeatedly for the same file should cache a line-start table
    /// themselves; this service intentionally stays O(n) and stateless.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let mut line = 0usize;
        let mut col = 0usize;
        for &b in &self.bytes[..offset.min(self.bytes.len())] {
            if b == b'\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Returns the full text of the line containing `offset`, without the
    /// trailing newline.
    pub fn line_text(&self, offset: usize) -> &str {
        let offset = offset.min(self.bytes.len());
        let start = self.bytes[..offset]
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let end = self.bytes[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| offset + i)
            .unwrap_or(self.bytes.len());
        std::str::from_utf8(&self.bytes[start..end]).unwrap_or("")
    }
}

/// Owns every file loaded during a compilation and hands out [`FileId`]s.
#[derive(Debug, Default)]
pub struct SourceSet {
    files: Vec<SourceFile>,
}

impl SourceSet {
    pub fn new() -> Self {
        SourceSet { files: Vec::new() }
    }

    pub fn add(&mut self, path: Symbol, bytes: Vec<u8>) -> FileId {
        self.files.push(SourceFile { path, bytes });
        FileId(self.files.len() as u32)
    }

    pub fn get(&self, id: FileId) -> &SourceFile {
        &self.files[id.0 as usize - 1]
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::Interner;

    #[test]
    fn file_ids_start_at_one() {
        let mut set = SourceSet::new();
        let mut interner = Interner::new();
        let path = interner.intern("a.brk");
        let id = set.add(path, b"hello".to_vec());
        assert_eq!(id, FileId(1));
        assert!(!id.is_none());
    }

    #[test]
    fn line_col_counts_newlines() {
        let mut set = SourceSet::new();
        let mut interner = Interner::new();
        let path = interner.intern("a.brk");
        let id = set.add(path, b"ab\ncd\nef".to_vec());
        let file = set.get(id);
        assert_eq!(file.line_col(0), (0, 0));
        assert_eq!(file.line_col(3), (1, 0));
        assert_eq!(file.line_col(7), (2, 1));
    }

    #[test]
    fn line_text_extracts_containing_line() {
        let mut set = SourceSet::new();
        let mut interner = Interner::new();
        let path = interner.intern("a.brk");
        let id = set.add(path, b"first\nsecond\nthird".to_vec());
        let file = set.get(id);
        assert_eq!(file.line_text(7), "second");
        assert_eq!(file.line_text(0), "first");
        assert_eq!(file.line_text(14), "third");
    }

    #[test]
    fn slice_returns_span_bytes() {
        let mut set = SourceSet::new();
        let mut interner = Interner::new();
        let path = interner.intern("a.brk");
        let id = set.add(path, b"hello world".to_vec());
        let file = set.get(id);
        assert_eq!(file.slice(Span::new(6, 11)), b"world");
    }
}
