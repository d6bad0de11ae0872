//! Source files and the offset → line/column index.
//!
//! All files of a compilation share one global offset space. Each file added to a [`SourceMap`] gets
//! a base offset, and the lexer produces spans as `base + local offset`. This keeps a [`Span`] a
//! plain pair of integers while still letting diagnostics find the file, line and column.
//!
//! [`Span`]: crate::frontend::ast::Span

/// Handle to a file registered in a [`SourceMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub u32);

/// A single source file.
#[derive(Debug)]
pub struct SourceFile {
    name: String,
    text: String,
    base: usize,
    line_starts: Vec<usize>,
}

impl SourceFile {
    fn new(name: String, text: String, base: usize) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.bytes().enumerate().filter(|&(_, b)| b == b'\n').map(|(i, _)| i + 1));
        Self {
            name,
            text,
            base,
            line_starts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// First global offset owned by this file.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Whether a global offset falls inside this file (the end-of-file position included).
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.base && offset <= self.base + self.text.len()
    }

    /// 1-based line and column of a file-local offset. Columns count bytes.
    fn line_col(&self, local: usize) -> (usize, usize) {
        let local = local.min(self.text.len());
        let line_idx = match self.line_starts.binary_search(&local) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line_idx + 1, local - self.line_starts[line_idx] + 1)
    }

    /// Raw text of a 1-based line, without its terminator.
    pub fn line(&self, line: usize) -> Option<&str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .map(|&next| next - 1)
            .unwrap_or(self.text.len());
        let text = self.text.get(start..end)?;
        Some(text.strip_suffix('\r').unwrap_or(text))
    }
}

/// A resolved source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub file: FileId,
    pub name: &'a str,
    pub line: usize,
    pub col: usize,
}

/// Registry of all source files taking part in a compilation.
#[derive(Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
    next_base: usize,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and assign it the next free range of global offsets.
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) -> FileId {
        let text = text.into();
        let base = self.next_base;
        // One spare offset per file so the EOF position never collides with the next file.
        self.next_base = base + text.len() + 1;
        let id = FileId(self.files.len() as u32);
        self.files.push(SourceFile::new(name.into(), text, base));
        id
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0 as usize)
    }

    /// Find the file owning a global offset.
    pub fn file_for(&self, offset: usize) -> Option<FileId> {
        self.files
            .iter()
            .position(|f| f.contains(offset))
            .map(|i| FileId(i as u32))
    }

    /// Resolve a global offset to file name, line and column.
    pub fn location(&self, offset: usize) -> Option<Location<'_>> {
        let id = self.file_for(offset)?;
        let file = self.file(id)?;
        let (line, col) = file.line_col(offset - file.base);
        Some(Location {
            file: id,
            name: &file.name,
            line,
            col,
        })
    }

    /// Raw text of a 1-based line of a file.
    pub fn line_text(&self, id: FileId, line: usize) -> Option<&str> {
        self.file(id)?.line(line)
    }
}
