//! Writing the finished index to disk

use crate::core::config::WriteMode;
use crate::core::error::{Result, TagsError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write `bytes` to `destination`.
///
/// [`WriteMode::Create`] creates the file if needed and truncates it, so a
/// shorter index never leaves stale bytes behind. [`WriteMode::Append`]
/// requires the file to exist already and writes after its current end.
pub fn persist(bytes: &[u8], destination: &Path, mode: WriteMode) -> Result<()> {
    let mut options = OpenOptions::new();
    match mode {
        WriteMode::Create => options.write(true).create(true).truncate(true),
        WriteMode::Append => options.append(true),
    };

    let wrap = |source| TagsError::Persistence {
        path: destination.to_path_buf(),
        source,
    };
    let mut file = options.open(destination).map_err(wrap)?;
    file.write_all(bytes).map_err(wrap)?;
    file.flush().map_err(wrap)?;

    info!(
        path = %destination.display(),
        bytes = bytes.len(),
        mode = ?mode,
        "tags file written"
    );
    Ok(())
}
