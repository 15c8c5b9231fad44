//! Run configuration
//!
//! Everything the core needs to know about where and how to write the TAGS
//! file arrives in one [`TagsConfig`] value. The core never consults the
//! working directory or the environment itself; the CLI resolves those and
//! fills the config in.

use crate::core::error::{Result, ResultExt, TagsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default name of the tags file
pub const DEFAULT_TAGS_NAME: &str = "TAGS";

/// How the tags file is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Create or truncate the destination and write from the start
    #[default]
    Create,
    /// Write after the end of an existing destination
    Append,
}

/// What to do when one of the input files does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseErrorPolicy {
    /// Fail the whole run; nothing is written
    #[default]
    Abort,
    /// Leave the file out of the index and keep going
    Skip,
}

/// Configuration for one tagging run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsConfig {
    /// Directory the tags file is written to (empty = relative to the process)
    #[serde(default)]
    pub save_dir: PathBuf,
    /// File name of the tags file
    #[serde(default = "default_tags_name")]
    pub tags_name: String,
    #[serde(default)]
    pub mode: WriteMode,
    #[serde(default)]
    pub on_parse_error: ParseErrorPolicy,
    /// Keep each file's lines in memory instead of rescanning per tag
    #[serde(default)]
    pub cache_lines: bool,
}

fn default_tags_name() -> String {
    DEFAULT_TAGS_NAME.to_string()
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::new(),
            tags_name: default_tags_name(),
            mode: WriteMode::default(),
            on_parse_error: ParseErrorPolicy::default(),
            cache_lines: false,
        }
    }
}

impl TagsConfig {
    /// Config writing `TAGS` into `save_dir`
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            ..Self::default()
        }
    }

    /// Load a JSON config file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(TagsError::from)
            .context(format!("reading config {}", path.display()))?;
        serde_json::from_str(&text)
            .map_err(TagsError::from)
            .context(format!("parsing config {}", path.display()))
    }

    /// Full path of the tags file
    pub fn destination(&self) -> PathBuf {
        self.save_dir.join(&self.tags_name)
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_parse_error_policy(mut self, policy: ParseErrorPolicy) -> Self {
        self.on_parse_error = policy;
        self
    }
}
