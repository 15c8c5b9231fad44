//! Position registry shared by every file parsed in one run
//!
//! Each registered file occupies its own range of a single global coordinate
//! space, so a bare [`Pos`] is enough to get back to a file, line and column.
//! Bases start at 1 and every file also owns its end-of-file position, so the
//! end of one file never coincides with the start of the next.

use std::fmt;

/// A position in the shared coordinate space of a [`FileSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos(usize);

impl Pos {
    /// The "no position" value; never produced by a registered file
    pub const NONE: Pos = Pos(0);

    pub fn is_valid(self) -> bool {
        self != Pos::NONE
    }
}

/// Human-readable coordinates of a [`Pos`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// File name as registered
    pub filename: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Byte column within the line (1-indexed)
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// Handle to one file registered in a [`FileSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHandle {
    index: usize,
    base: usize,
    size: usize,
}

impl FileHandle {
    /// First position of the file
    pub fn base(&self) -> usize {
        self.base
    }

    /// Length of the registered text in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Global position of a byte offset in this file.
    ///
    /// Offsets past the end are clamped to the end-of-file position.
    pub fn pos(&self, offset: usize) -> Pos {
        Pos(self.base + offset.min(self.size))
    }
}

#[derive(Debug)]
struct SourceFile {
    name: String,
    base: usize,
    size: usize,
    /// Byte offsets at which each line starts; always begins with 0
    line_starts: Vec<usize>,
}

impl SourceFile {
    fn new(name: String, base: usize, text: &[u8]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.iter()
                .enumerate()
                .filter_map(|(i, &b)| (b == b'\n').then_some(i + 1)),
        );
        Self {
            name,
            base,
            size: text.len(),
            line_starts,
        }
    }

    fn contains(&self, pos: usize) -> bool {
        pos >= self.base && pos <= self.base + self.size
    }

    fn position(&self, pos: usize) -> Position {
        let offset = pos - self.base;
        let line = self.line_starts.partition_point(|&start| start <= offset);
        Position {
            filename: self.name.clone(),
            line,
            column: offset - self.line_starts[line - 1] + 1,
        }
    }
}

/// Append-only registry of every file parsed during one run
#[derive(Debug)]
pub struct FileSet {
    files: Vec<SourceFile>,
    next_base: usize,
}

impl FileSet {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            next_base: 1,
        }
    }

    /// Add a file's text to the coordinate space
    pub fn register(&mut self, name: impl Into<String>, text: &[u8]) -> FileHandle {
        let base = self.next_base;
        let file = SourceFile::new(name.into(), base, text);
        let handle = FileHandle {
            index: self.files.len(),
            base,
            size: file.size,
        };
        self.next_base = base + file.size + 1;
        self.files.push(file);
        handle
    }

    /// Convert a position back to file, line and column
    ///
    /// Returns `None` for [`Pos::NONE`] and positions outside every file.
    pub fn resolve(&self, pos: Pos) -> Option<Position> {
        if !pos.is_valid() {
            return None;
        }
        let idx = self.files.partition_point(|f| f.base <= pos.0);
        let file = self.files.get(idx.checked_sub(1)?)?;
        file.contains(pos.0).then(|| file.position(pos.0))
    }

    /// Name a handle was registered under
    pub fn name(&self, handle: FileHandle) -> Option<&str> {
        self.files.get(handle.index).map(|f| f.name.as_str())
    }

    /// Number of registered files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Default for FileSet {
    fn default() -> Self {
        Self::new()
    }
}
