//! Source line lookup
//!
//! Every tag record carries the full text of the line its identifier sits on.
//! [`LineSource`] is the seam used by the indexer; [`RescanLines`] reopens and
//! rescans the file on every call, [`CachedLines`] keeps the line table of each
//! file it has already seen. Both return the same bytes for the same request.

use crate::core::error::{Result, TagsError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[cfg(test)]
use mockall::automock;

/// Lookup of a single source line by 1-based number
#[cfg_attr(test, automock)]
pub trait LineSource {
    /// Raw bytes of line `line` of `path`, without the trailing `\n`
    fn line_text(&self, path: &Path, line: usize) -> Result<Vec<u8>>;
}

/// Read line `n` (1-based) from `reader`.
///
/// Only complete, `\n`-terminated lines count; a trailing fragment with no
/// newline is not a line. Returns `Ok(None)` when the reader runs out first.
pub fn read_line<R: BufRead>(mut reader: R, n: usize) -> std::io::Result<Option<Vec<u8>>> {
    if n == 0 {
        return Ok(None);
    }
    let mut buf = Vec::new();
    for _ in 0..n {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 || buf.last() != Some(&b'\n') {
            return Ok(None);
        }
    }
    buf.pop();
    Ok(Some(buf))
}

/// Reopens and rescans the file for every request
#[derive(Debug, Default, Clone, Copy)]
pub struct RescanLines;

impl LineSource for RescanLines {
    fn line_text(&self, path: &Path, line: usize) -> Result<Vec<u8>> {
        let not_found = || TagsError::LineNotFound {
            path: path.to_path_buf(),
            line,
        };
        let file = File::open(path).map_err(|_| not_found())?;
        read_line(BufReader::new(file), line)
            .map_err(|_| not_found())?
            .ok_or_else(not_found)
    }
}

/// File bytes plus the offset of every complete line
#[derive(Debug)]
struct LineTable {
    bytes: Vec<u8>,
    /// `(start, end)` of each `\n`-terminated line, end excluding the `\n`
    lines: Vec<(usize, usize)>,
}

impl LineTable {
    fn new(bytes: Vec<u8>) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                lines.push((start, i));
                start = i + 1;
            }
        }
        Self { bytes, lines }
    }

    fn line(&self, n: usize) -> Option<&[u8]> {
        let &(start, end) = self.lines.get(n.checked_sub(1)?)?;
        Some(&self.bytes[start..end])
    }
}

/// Reads each file once and serves later lines from memory
#[derive(Debug, Default)]
pub struct CachedLines {
    tables: RefCell<HashMap<PathBuf, Rc<LineTable>>>,
}

impl CachedLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files currently cached
    pub fn cached_files(&self) -> usize {
        self.tables.borrow().len()
    }

    fn table(&self, path: &Path) -> std::io::Result<Rc<LineTable>> {
        if let Some(table) = self.tables.borrow().get(path) {
            return Ok(Rc::clone(table));
        }
        let table = Rc::new(LineTable::new(std::fs::read(path)?));
        self.tables
            .borrow_mut()
            .insert(path.to_path_buf(), Rc::clone(&table));
        Ok(table)
    }
}

impl LineSource for CachedLines {
    fn line_text(&self, path: &Path, line: usize) -> Result<Vec<u8>> {
        let not_found = || TagsError::LineNotFound {
            path: path.to_path_buf(),
            line,
        };
        let table = self.table(path).map_err(|_| not_found())?;
        table.line(line).map(<[u8]>::to_vec).ok_or_else(not_found)
    }
}
