//! Ordered assembly of fragments into one document
//!
//! pgbouncer matches auth rules first-match-wins, so the order of lines is
//! part of the file's meaning. Fragments are sorted by order key with a
//! stable sort: equal keys keep their declaration order.

use super::fragment::Fragment;
use crate::error::{Error, Result};
use hba_fs::{compute_content_checksum, compute_file_checksum, write_atomic};
use std::collections::HashSet;
use std::path::Path;

/// Header placed at the top of generated files unless overridden.
pub const DEFAULT_HEADER: &str =
    "This file is managed by pgbouncer-hba. Local changes will be overwritten.";

/// Controls the non-rule content of the assembled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Comment block at the top of the file; `None` or empty omits it
    pub header: Option<String>,
    /// Emit `# <description>` above each rule line
    pub include_descriptions: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            header: Some(DEFAULT_HEADER.to_string()),
            include_descriptions: true,
        }
    }
}

impl AssemblyOptions {
    /// Only the rule lines, nothing else.
    pub fn bare() -> Self {
        Self {
            header: None,
            include_descriptions: false,
        }
    }
}

/// Result of writing an assembled document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File already had the expected content and was left untouched
    Unchanged,
    /// File was created or replaced
    Written,
}

/// Comparison of an assembled document against the file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftStatus {
    InSync,
    Drifted { expected: String, actual: String },
    Missing,
}

/// Builds the final auth file from fragments.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: AssemblyOptions,
}

impl Assembler {
    pub fn new(options: AssemblyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    /// Sort fragments by order key and concatenate them.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateFragment` if two fragments share a name.
    pub fn assemble(&self, fragments: &[Fragment]) -> Result<String> {
        let mut seen = HashSet::new();
        for fragment in fragments {
            if !seen.insert(fragment.name.as_str()) {
                return Err(Error::DuplicateFragment {
                    name: fragment.name.clone(),
                });
            }
        }

        let mut ordered: Vec<&Fragment> = fragments.iter().collect();
        ordered.sort_by(|a, b| a.order.cmp(&b.order));

        let mut lines = Vec::new();
        if let Some(header) = self.options.header.as_deref().filter(|h| !h.is_empty()) {
            lines.extend(header.lines().map(comment_line));
        }
        for fragment in ordered {
            if self.options.include_descriptions && !fragment.description.is_empty() {
                lines.extend(fragment.description.lines().map(comment_line));
            }
            lines.push(fragment.line.clone());
        }

        if lines.is_empty() {
            return Ok(String::new());
        }

        let mut document = lines.join("\n");
        document.push('\n');
        Ok(document)
    }

    /// Assemble and write to `path`, skipping the write when the file is
    /// already up to date.
    pub fn write(&self, fragments: &[Fragment], path: &Path) -> Result<WriteOutcome> {
        let document = self.assemble(fragments)?;

        if compute_file_checksum(path)? == Some(compute_content_checksum(&document)) {
            tracing::debug!(path = %path.display(), "auth file unchanged");
            return Ok(WriteOutcome::Unchanged);
        }

        write_atomic(path, document.as_bytes())?;
        tracing::info!(path = %path.display(), rules = fragments.len(), "wrote auth file");
        Ok(WriteOutcome::Written)
    }

    /// Compare the assembled document with the file at `path`.
    pub fn check(&self, fragments: &[Fragment], path: &Path) -> Result<DriftStatus> {
        let document = self.assemble(fragments)?;
        let expected = compute_content_checksum(&document);

        match compute_file_checksum(path)? {
            None => Ok(DriftStatus::Missing),
            Some(actual) if actual == expected => Ok(DriftStatus::InSync),
            Some(actual) => Ok(DriftStatus::Drifted { expected, actual }),
        }
    }
}

fn comment_line(line: &str) -> String {
    if line.starts_with('#') {
        line.to_string()
    } else if line.is_empty() {
        "#".to_string()
    } else {
        format!("# {}", line)
    }
}
