//! Schema-driven generation of PHP CRUD field classes.
//!
//! For every table the engine emits one pair of classes per non-identifier
//! column plus the table-level Edit, Delete, Checkbox and OpenInApi fields:
//!
//! 1. A pass pipeline builds an in-memory [`artifact::PhpFile`]: the base pass
//!    picks the generic strategy for the column's form type, feature passes
//!    (lookup, required) add optional capabilities.
//! 2. [`render`] turns the representation into PHP source.
//! 3. [`write`] applies the two-tier policy: base classes are regenerated on
//!    every run, skeleton subclasses are created once and then left alone.
//!
//! # Example
//!
//! ```ignore
//! use crudgen_codegen::{CrudFieldGenerator, GeneratorConfig};
//!
//! let generator = CrudFieldGenerator::new(GeneratorConfig::new().root("classes/Crud"));
//! for report in generator.generate_schema(&schema)? {
//!     println!("{}: {} files", report.table, report.files.len());
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod artifact;
pub mod config;
pub mod engine;
pub mod field;
pub mod kinds;
pub mod lookup;
pub mod overview;
pub mod pass;
pub mod providers;
pub mod render;
pub mod report;
pub mod skeleton;
pub mod strategy;
pub mod write;

pub use config::GeneratorConfig;
pub use engine::CrudFieldGenerator;
pub use pass::{GenerationContext, Pass, PassManager};
pub use report::{Diagnostic, Level, TableReport};
pub use strategy::Strategy;
pub use write::{Tier, WriteOutcome};

/// Errors that abort generation of a table.
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid output path: {0}")]
    InvalidPath(String),

    #[error("{0}")]
    Custom(String),
}

impl CodegenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodegenError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A generated file with its relative path, content and write tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root.
    pub path: PathBuf,
    /// Content of the generated file.
    pub content: String,
    /// Whether the file is regenerated or created once.
    pub tier: Tier,
}

impl GeneratedFile {
    /// Creates a new generated file.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, tier: Tier) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            tier,
        }
    }
}

/// Returns the namespace of a table's field classes for the given tier.
pub fn field_namespace(table: &crudgen_schema::Table, tier: Tier) -> String {
    let namespace = format!("{}\\{}\\Field", table.crud_namespace(), table.php_name());
    match tier {
        Tier::Base => format!("{namespace}\\Base"),
        Tier::Skeleton => namespace,
    }
}

/// Returns the path of a field class relative to the CRUD root.
///
/// Base classes live in `<crud-dir>/<Type>/Field/Base/<Class>.php`, skeletons
/// in `<crud-dir>/<Type>/Field/<Class>.php`.
pub fn field_path(table: &crudgen_schema::Table, class_name: &str, tier: Tier) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in table.crud_dir_segments() {
        path.push(segment);
    }
    path.push(table.php_name());
    path.push("Field");
    if tier == Tier::Base {
        path.push("Base");
    }
    path.push(format!("{class_name}.php"));
    path
}

pub(crate) fn validate_relative_path(path: &Path) -> Result<(), CodegenError> {
    use std::path::Component;

    if path.is_absolute() {
        return Err(CodegenError::InvalidPath(format!(
            "generated file path must be relative: {}",
            path.display()
        )));
    }

    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            // Anything but a plain segment could leave the output root.
            Component::ParentDir | Component::CurDir | Component::Prefix(_) | Component::RootDir => {
                return Err(CodegenError::InvalidPath(format!(
                    "generated file path must be a normal relative path: {}",
                    path.display()
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudgen_schema::Table;

    #[test]
    fn test_field_paths() {
        let mut table = Table::new("invoice");
        assert_eq!(
            field_path(&table, "Amount", Tier::Base),
            PathBuf::from("Invoice/Field/Base/Amount.php")
        );

        table.crud_dir = Some("Custom/Acme".to_string());
        assert_eq!(
            field_path(&table, "Amount", Tier::Skeleton),
            PathBuf::from("Custom/Acme/Invoice/Field/Amount.php")
        );
        assert_eq!(
            field_namespace(&table, Tier::Base),
            "Crud\\Custom\\Acme\\Invoice\\Field\\Base"
        );
    }

    #[test]
    fn test_validate_relative_path() {
        assert!(validate_relative_path(Path::new("Invoice/Field/Amount.php")).is_ok());
        assert!(validate_relative_path(Path::new("../Amount.php")).is_err());
        assert!(validate_relative_path(Path::new("/tmp/Amount.php")).is_err());
    }
}
