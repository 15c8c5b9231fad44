//! tago - Emacs TAGS for Go
//!
//! This library builds an Emacs-style TAGS index for Go source files: every
//! top-level function, method, type, constant and variable name is recorded
//! together with the text of its source line and its line/column position.
//! It is consumed by:
//! - The CLI binary (src/bin/tago.rs)
//! - Editor integrations that want the index in memory
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): re-exports and the one-call entry point
//! - **core/**: parsing, extraction, formatting and persistence
//! - **bin/tago.rs**: flag parsing, working directory and logging setup
//!
//! # Example
//!
//! ```rust,ignore
//! use tago::{tag_files, TagsConfig};
//!
//! let config = TagsConfig::new("/path/to/project");
//! let summary = tag_files(&config, &["main.go", "util.go"])?;
//! println!("{} tags written to {}", summary.records, summary.destination.display());
//! ```

pub mod core;

pub use crate::core::{
    expand_inputs, FileBlock, Indexer, ParseErrorPolicy, Result, RunSummary, TagIndex,
    TagsConfig, TagsError, WriteMode,
};
use std::path::Path;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tag `files` and write the index as described by `config`
pub fn tag_files<P: AsRef<Path>>(config: &TagsConfig, files: &[P]) -> Result<RunSummary> {
    Indexer::from_config(config)?.run(config, files)
}

/// Build the serialized index for `files` without writing it anywhere
pub fn build_index<P: AsRef<Path>>(config: &TagsConfig, files: &[P]) -> Result<Vec<u8>> {
    Ok(Indexer::from_config(config)?.build(files)?.to_bytes())
}
