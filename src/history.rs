//! Append-only log of quotes that have already been posted.
//!
//! A [`HistoryLog`] holds an exclusive advisory lock on the file from the
//! moment it is opened until it is dropped, so the read at the start of a run
//! and the append at its end form one unit. A second invocation blocks in
//! [`HistoryLog::open`] until the first one finishes.
//!
//! Quotes are compared and stored in [`normalize`]d form, so a line written
//! by an older tool with stray whitespace still counts as posted.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::PostError;

/// A locked, in-memory view of the history file.
#[derive(Debug)]
pub struct HistoryLog {
    path: PathBuf,
    file: File,
    index: HashSet<String>,
}

impl HistoryLog {
    /// Open (creating if needed), lock, and read the history file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, locked, or read as UTF-8.
    pub fn open(path: &Path) -> Result<Self, PostError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| PostError::History(format!("cannot open {}: {e}", path.display())))?;

        FileExt::lock_exclusive(&file)
            .map_err(|e| PostError::History(format!("cannot lock {}: {e}", path.display())))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| PostError::History(format!("cannot read {}: {e}", path.display())))?;

        let index: HashSet<String> =
            contents.lines().map(normalize).filter(|l| !l.is_empty()).collect();

        tracing::debug!(path = %path.display(), entries = index.len(), "history loaded");
        Ok(Self { path: path.to_path_buf(), file, index })
    }

    /// A log whose appends fail, for exercising write errors.
    #[cfg(test)]
    pub(crate) fn open_read_only(path: &Path) -> Result<Self, PostError> {
        std::fs::write(path, b"")?;
        let file = OpenOptions::new().read(true).open(path)?;
        Ok(Self { path: path.to_path_buf(), file, index: HashSet::new() })
    }

    /// Membership test on the normalized form of `quote`.
    #[must_use]
    pub fn contains(&self, quote: &str) -> bool {
        self.index.contains(&normalize(quote))
    }

    /// Number of distinct recorded quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Append the normalized quote as a new line and flush it to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn append(&mut self, quote: &str) -> Result<(), PostError> {
        let line = normalize(quote);
        if line.is_empty() {
            return Err(PostError::History("refusing to record an empty quote".into()));
        }

        // a file written by hand may lack its trailing newline
        let needs_separator = self.ends_without_newline()?;
        let mut buf = String::with_capacity(line.len() + 2);
        if needs_separator {
            buf.push('\n');
        }
        buf.push_str(&line);
        buf.push('\n');

        self.file
            .write_all(buf.as_bytes())
            .and_then(|()| self.file.sync_data())
            .map_err(|e| PostError::History(format!("cannot append to {}: {e}", self.path.display())))?;

        self.index.insert(line);
        Ok(())
    }

    fn ends_without_newline(&mut self) -> Result<bool, PostError> {
        let len = self.file.metadata()?.len();
        if len == 0 {
            return Ok(false);
        }
        self.file.seek(SeekFrom::Start(len - 1))?;
        let mut last = [0u8; 1];
        self.file.read_exact(&mut last)?;
        Ok(last[0] != b'\n')
    }
}

/// The form a quote is stored and compared in: one line, no surrounding
/// whitespace, line breaks folded to single spaces.
#[must_use]
pub fn normalize(quote: &str) -> String {
    quote
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
