//! Core module for tago
//!
//! # Architecture
//!
//! - `position`: shared coordinate space for every file of a run (FileSet)
//! - `lines`: source line lookup behind the LineSource trait
//! - `syntax`: Tree-sitter Go parsing and top-level declaration extraction
//! - `format`: TAGS record and section rendering
//! - `index`: the Indexer that ties a run together
//! - `persist`: writing the finished index
//! - `config`: TagsConfig and its JSON loading
//! - `walker`: expansion of directory inputs
//! - `error`: error types using thiserror

pub mod config;
pub mod error;
pub mod format;
pub mod index;
pub mod lines;
pub mod persist;
pub mod position;
pub mod syntax;
pub mod walker;

// Re-export commonly used types
pub use config::{ParseErrorPolicy, TagsConfig, WriteMode, DEFAULT_TAGS_NAME};
pub use error::{Result, ResultExt, TagsError};
pub use format::{render_header, render_record, FileBlock};
pub use index::{Indexer, RunSummary, Section, TagIndex};
pub use lines::{read_line, CachedLines, LineSource, RescanLines};
pub use persist::persist;
pub use position::{FileHandle, FileSet, Pos, Position};
pub use syntax::{DeclKind, DeclarationTree, GoParser, TaggableIdentifier};
pub use walker::expand_inputs;
