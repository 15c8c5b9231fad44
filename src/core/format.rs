//! Emacs TAGS record and section formatting
//!
//! A TAGS file is a sequence of sections, one per source file:
//!
//! ```text
//! \x0c
//! <filename>,<byte-length-of-records>
//! <line-text><name><line>,<column>
//! ...
//! ```
//!
//! The line text and the name are written back to back with no separator
//! byte between them.

use std::io::Write;

/// Form feed opening every section header
pub const SECTION_MARK: u8 = 0x0c;

/// Render one tag record
pub fn render_record(line_text: &[u8], name: &str, line: usize, column: usize) -> Vec<u8> {
    let mut record = Vec::with_capacity(line_text.len() + name.len() + 16);
    record.extend_from_slice(line_text);
    record.extend_from_slice(name.as_bytes());
    // writing into a Vec cannot fail
    let _ = writeln!(record, "{line},{column}");
    record
}

/// Render the header that precedes a section body of `body_len` bytes
pub fn render_header(filename: &str, body_len: usize) -> Vec<u8> {
    let mut header = Vec::with_capacity(filename.len() + 24);
    header.push(SECTION_MARK);
    header.push(b'\n');
    header.extend_from_slice(filename.as_bytes());
    let _ = writeln!(header, ",{body_len}");
    header
}

/// The serialized tags for one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlock {
    filename: String,
    body: Vec<u8>,
    records: usize,
}

impl FileBlock {
    /// Assemble a block from rendered records, keeping their order
    pub fn new<I>(filename: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut body = Vec::new();
        let mut count = 0;
        for record in records {
            body.extend_from_slice(&record);
            count += 1;
        }
        Self {
            filename: filename.into(),
            body,
            records: count,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Concatenated records
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Byte length declared in the header; always `body().len()`
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn record_count(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    pub fn header(&self) -> Vec<u8> {
        render_header(&self.filename, self.body.len())
    }

    /// Append header and body to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header());
        out.extend_from_slice(&self.body);
    }

    /// Total serialized size, header included
    pub fn encoded_len(&self) -> usize {
        self.header().len() + self.body.len()
    }
}
