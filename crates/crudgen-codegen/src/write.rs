//! Two-tier write policy.
//!
//! Base classes belong to the generator and are overwritten on every run.
//! Skeleton classes belong to the user once they exist: they are created with
//! an exclusive-create open, so an existing file is never touched, even when
//! two runs race on the same path.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{validate_relative_path, CodegenError, GeneratedFile};

/// Write tier of a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Regenerated on every run.
    Base,
    /// Created once, then owned by the user.
    Skeleton,
}

/// What happened to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was written.
    Created,
    /// A base file existed and was replaced.
    Overwritten,
    /// A skeleton file existed and was left untouched.
    SkippedExisting,
}

/// Writes `file` below `root` according to its tier.
///
/// Returns the full path together with the outcome.
pub fn write_file(root: &Path, file: &GeneratedFile) -> Result<(PathBuf, WriteOutcome), CodegenError> {
    validate_relative_path(&file.path)?;
    let path = root.join(&file.path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
    }

    let outcome = match file.tier {
        Tier::Base => write_base(&path, &file.content)?,
        Tier::Skeleton => write_skeleton(&path, &file.content)?,
    };

    Ok((path, outcome))
}

fn write_base(path: &Path, content: &str) -> Result<WriteOutcome, CodegenError> {
    let existed = path.exists();
    fs::write(path, content).map_err(|e| CodegenError::io(path, e))?;
    Ok(if existed {
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Created
    })
}

fn write_skeleton(path: &Path, content: &str) -> Result<WriteOutcome, CodegenError> {
    create_exclusive(path, |handle| handle.write_all(content.as_bytes()))
}

/// Creates `path` only if it does not exist and fills it with `fill`.
///
/// A file that could not be filled completely is removed again, otherwise
/// the next run would keep the partial file as user content.
fn create_exclusive(
    path: &Path,
    fill: impl FnOnce(&mut File) -> io::Result<()>,
) -> Result<WriteOutcome, CodegenError> {
    let mut handle = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(handle) => handle,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(WriteOutcome::SkippedExisting),
        Err(e) => return Err(CodegenError::io(path, e)),
    };

    if let Err(e) = fill(&mut handle).and_then(|()| handle.sync_all()) {
        drop(handle);
        if let Err(remove) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %remove, "could not remove partial skeleton");
        }
        return Err(CodegenError::io(path, e));
    }
    Ok(WriteOutcome::Created)
}
