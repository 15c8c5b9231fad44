//! Input expansion
//!
//! Files named on the command line are taken as given, in order. A directory
//! expands to the Go files beneath it, sorted by path so repeated runs see the
//! same order. Hidden directories and `testdata` trees are not entered.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extension of the files picked up from directories
pub const GO_EXTENSION: &str = "go";

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "testdata"
}

fn is_go_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(GO_EXTENSION)
}

/// Expand directories in `inputs` to the Go files they contain
pub fn expand_inputs<P: AsRef<Path>>(inputs: &[P]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if !input.is_dir() {
            files.push(input.to_path_buf());
            continue;
        }
        let mut found: Vec<PathBuf> = WalkDir::new(input)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_go_file(e.path()))
            .map(DirEntry::into_path)
            .collect();
        found.sort();
        files.extend(found);
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_plain_files_pass_through_in_order() {
        let inputs = ["b.go", "a.go", "missing.go"];
        let files = expand_inputs(&inputs);
        assert_eq!(
            files,
            vec![
                PathBuf::from("b.go"),
                PathBuf::from("a.go"),
                PathBuf::from("missing.go")
            ]
        );
    }

    #[test]
    fn test_directory_expands_sorted_go_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pkg/sub")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("testdata")).unwrap();
        fs::write(root.join("main.go"), "package main\n").unwrap();
        fs::write(root.join("README.md"), "# readme\n").unwrap();
        fs::write(root.join("pkg/sub/z.go"), "package sub\n").unwrap();
        fs::write(root.join("pkg/a.go"), "package pkg\n").unwrap();
        fs::write(root.join(".git/hook.go"), "package git\n").unwrap();
        fs::write(root.join("testdata/bad.go"), "not go\n").unwrap();

        let files = expand_inputs(&[root]);
        assert_eq!(
            files,
            vec![
                root.join("main.go"),
                root.join("pkg/a.go"),
                root.join("pkg/sub/z.go"),
            ]
        );
    }
}
