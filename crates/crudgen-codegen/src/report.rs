//! Per-table progress reports.
//!
//! Everything the engine tells the user is also emitted as a `tracing`
//! event; the report keeps the same information for callers and tests.

use std::path::PathBuf;

use crate::write::{Tier, WriteOutcome};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
}

/// A human-readable progress or problem message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    /// Forwards the diagnostic to the `tracing` subscriber.
    pub fn emit(&self, table: &str) {
        match self.level {
            Level::Info => tracing::info!(table, "{}", self.message),
            Level::Warning => tracing::warn!(table, "{}", self.message),
        }
    }
}

/// A file the engine wrote or left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute or root-joined path of the file.
    pub path: PathBuf,
    pub tier: Tier,
    pub outcome: WriteOutcome,
}

/// Outcome of generating one table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableReport {
    pub table: String,
    pub files: Vec<FileRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TableReport {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Records a diagnostic and emits it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit(&self.table);
        self.diagnostics.push(diagnostic);
    }

    /// Records a file and logs its outcome.
    pub fn record(&mut self, record: FileRecord) {
        let path = record.path.display().to_string();
        match record.outcome {
            WriteOutcome::Created => tracing::info!(table = %self.table, %path, "created"),
            WriteOutcome::Overwritten => tracing::info!(table = %self.table, %path, "regenerated"),
            WriteOutcome::SkippedExisting => {
                tracing::info!(table = %self.table, %path, "skipped, it already existed")
            }
        }
        self.files.push(record);
    }

    /// Returns the warnings of this report.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.level == Level::Warning)
    }

    /// Returns the record for a path ending in `suffix`.
    pub fn file(&self, suffix: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.path.ends_with(suffix))
    }

    /// Returns the number of files actually written.
    pub fn written(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome != WriteOutcome::SkippedExisting)
            .count()
    }
}
