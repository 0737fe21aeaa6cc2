//! # Scanner
//!
//! Discovers `*.jsonl` session logs under a root and streams them line by line.
//! A missing or unreadable root is an empty corpus, not an error.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const LOG_EXTENSION: &str = "jsonl";

/// All JSONL files below `root`, sorted for a stable scan order.
pub fn discover_jsonl_files(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some(LOG_EXTENSION))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Lazy, single-pass iterator over the non-blank lines of one log file.
///
/// A line that is not valid UTF-8 is skipped; any other read error ends the file.
pub struct JsonlLines {
    path: PathBuf,
    inner: Lines<BufReader<File>>,
    done: bool,
}

impl JsonlLines {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            inner: BufReader::new(file).lines(),
            done: false,
        })
    }
}

impl Iterator for JsonlLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        loop {
            let line = match self.inner.next()? {
                Ok(l) => l,
                // bytes of the bad line are already consumed
                Err(err) if err.kind() == io::ErrorKind::InvalidData => continue,
                Err(err) => {
                    debug!(path = %self.path.display(), error = %err, "stopping read of log");
                    self.done = true;
                    return None;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(discover_jsonl_files(&tmp.path().join("nope")).is_empty());
    }

    #[test]
    fn finds_nested_jsonl_only() {
        let tmp = TempDir::new().unwrap();
        let proj = tmp.path().join("proj-a").join("sub");
        fs::create_dir_all(&proj).unwrap();
        fs::write(tmp.path().join("top.jsonl"), "{}\n").unwrap();
        fs::write(proj.join("s1.jsonl"), "{}\n").unwrap();
        fs::write(proj.join("notes.txt"), "x").unwrap();
        fs::write(proj.join("s2.JSONL"), "{}\n").unwrap();
        fs::create_dir_all(tmp.path().join("dir.jsonl")).unwrap();

        let files = discover_jsonl_files(tmp.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "jsonl"));
    }

    #[test]
    fn skips_blank_and_invalid_utf8_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.jsonl");
        let mut bytes = b"first\n\n   \n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        bytes.extend_from_slice(b"second");
        fs::write(&path, bytes).unwrap();

        let lines: Vec<String> = JsonlLines::open(&path).unwrap().collect();
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn persistent_read_error_ends_the_file() {
        // opening a directory succeeds on unix, but every read fails with the same error
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("stuck.jsonl");
        fs::create_dir_all(&dir).unwrap();

        let mut lines = JsonlLines::open(&dir).unwrap();
        assert_eq!(lines.next(), None);
        assert_eq!(lines.next(), None);
    }
}
