//! Index aggregation
//!
//! [`Indexer`] drives one run: every input file is parsed, its top-level
//! names are resolved to line text through the run's [`FileSet`], and the
//! resulting [`FileBlock`]s are collected in input order into a [`TagIndex`]
//! that is serialized once at the end.

use crate::core::config::{ParseErrorPolicy, TagsConfig};
use crate::core::error::{Result, TagsError};
use crate::core::format::{render_record, FileBlock, SECTION_MARK};
use crate::core::lines::{CachedLines, LineSource, RescanLines};
use crate::core::persist::persist;
use crate::core::position::FileSet;
use crate::core::syntax::{DeclarationTree, GoParser};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Every file block produced by one run, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    blocks: Vec<FileBlock>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: FileBlock) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[FileBlock] {
        &self.blocks
    }

    /// Total number of tag records across all blocks
    pub fn record_count(&self) -> usize {
        self.blocks.iter().map(FileBlock::record_count).sum()
    }

    /// True when no block holds a single record
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Serialize every block, header first, in order
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.blocks.iter().map(FileBlock::encoded_len).sum());
        for block in &self.blocks {
            block.write_to(&mut out);
        }
        out
    }

    /// Split a serialized index back into `(filename, body)` sections using
    /// the lengths declared in each header.
    ///
    /// Returns `None` if the buffer does not follow the section layout.
    pub fn split(bytes: &[u8]) -> Option<Vec<Section<'_>>> {
        let mut sections = Vec::new();
        let mut rest = bytes;
        while !rest.is_empty() {
            rest = rest.strip_prefix(&[SECTION_MARK, b'\n'][..])?;
            let header_end = rest.iter().position(|&b| b == b'\n')?;
            let header = std::str::from_utf8(&rest[..header_end]).ok()?;
            let (filename, len) = header.rsplit_once(',')?;
            let len: usize = len.parse().ok()?;
            let body_start = header_end + 1;
            let body = rest.get(body_start..body_start + len)?;
            sections.push(Section { filename, body });
            rest = &rest[body_start + len..];
        }
        Some(sections)
    }
}

/// One section of a serialized index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub filename: &'a str,
    pub body: &'a [u8],
}

/// Outcome of a run that reached the disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub destination: PathBuf,
    pub files: usize,
    pub records: usize,
    pub bytes: usize,
}

/// Builds a [`TagIndex`] for a list of Go files
pub struct Indexer {
    parser: GoParser,
    lines: Box<dyn LineSource>,
    policy: ParseErrorPolicy,
}

impl Indexer {
    /// Indexer that rescans files for line text and aborts on parse errors
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: GoParser::new()?,
            lines: Box::new(RescanLines),
            policy: ParseErrorPolicy::Abort,
        })
    }

    /// Indexer set up from the relevant parts of `config`
    pub fn from_config(config: &TagsConfig) -> Result<Self> {
        let lines: Box<dyn LineSource> = if config.cache_lines {
            Box::new(CachedLines::new())
        } else {
            Box::new(RescanLines)
        };
        Ok(Self::new()?
            .with_line_source(lines)
            .with_parse_error_policy(config.on_parse_error))
    }

    pub fn with_line_source(mut self, lines: Box<dyn LineSource>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_parse_error_policy(mut self, policy: ParseErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Tag every file, in the order given
    pub fn build<P: AsRef<Path>>(&self, files: &[P]) -> Result<TagIndex> {
        let mut fset = FileSet::new();
        let mut index = TagIndex::new();

        for path in files {
            let path = path.as_ref();
            let tree = match self.parser.parse_file(&mut fset, path) {
                Ok(tree) => tree,
                Err(err) => match self.policy {
                    ParseErrorPolicy::Abort => {
                        return Err(TagsError::aborted_by("parsing errors experienced", err));
                    }
                    ParseErrorPolicy::Skip => {
                        warn!(path = %path.display(), error = %err, "skipping file");
                        continue;
                    }
                },
            };
            index.push(self.tag_file(&fset, &tree));
        }

        if index.is_empty() {
            return Err(TagsError::aborted("no tags were produced"));
        }
        Ok(index)
    }

    /// Build the block for one parsed file
    pub fn tag_file(&self, fset: &FileSet, tree: &DeclarationTree) -> FileBlock {
        let filename = tree.path().to_string_lossy().into_owned();
        let mut records = Vec::new();

        for ident in tree.identifiers() {
            let Some(position) = fset.resolve(ident.pos) else {
                warn!(name = %ident.name, kind = ident.kind.name(), "identifier has no position");
                continue;
            };
            match self.lines.line_text(tree.path(), position.line) {
                Ok(text) => records.push(render_record(
                    &text,
                    &ident.name,
                    position.line,
                    position.column,
                )),
                Err(err) => {
                    warn!(
                        name = %ident.name,
                        kind = ident.kind.name(),
                        at = %position,
                        error = %err,
                        "could not read line"
                    );
                }
            }
        }

        let block = FileBlock::new(filename, records);
        debug!(
            file = block.filename(),
            records = block.record_count(),
            bytes = block.body_len(),
            "file tagged"
        );
        block
    }

    /// Build the index for `files` and write it where `config` says
    pub fn run<P: AsRef<Path>>(&self, config: &TagsConfig, files: &[P]) -> Result<RunSummary> {
        let index = self.build(files)?;
        let bytes = index.to_bytes();
        let destination = config.destination();
        persist(&bytes, &destination, config.mode)?;
        Ok(RunSummary {
            destination,
            files: index.blocks().len(),
            records: index.record_count(),
            bytes: bytes.len(),
        })
    }
}
