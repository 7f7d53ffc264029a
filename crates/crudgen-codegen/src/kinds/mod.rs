//! Table-level field classes.
//!
//! Besides one class per column every table gets a fixed set of fields that
//! do not come from the schema: Edit, Delete, Checkbox and OpenInApi. Each
//! kind builds its base class here; the engine renders and writes it with
//! the same two-tier policy as column fields.

pub mod checkbox;
pub mod delete;
pub mod edit;
pub mod open_in_api;

pub use checkbox::CheckboxField;
pub use delete::DeleteField;
pub use edit::EditField;
pub use open_in_api::OpenInApiField;

use crudgen_schema::{Database, Table};

use crate::artifact::PhpFile;
use crate::config::GeneratorConfig;
use crate::providers::ApiTraitProbe;
use crate::strategy::Strategy;
use crate::{field_namespace, Tier};

/// Read-only input of a table-level generator.
pub struct TableInput<'a> {
    pub database: &'a Database,
    pub table: &'a Table,
    pub config: &'a GeneratorConfig,
    pub api_probe: &'a dyn ApiTraitProbe,
}

/// A generator for one fixed, table-level field class.
pub trait TableFieldGenerator: Send + Sync {
    /// Class name of the generated field, e.g. `Edit`.
    fn class_name(&self) -> &'static str;

    /// Checks whether the field applies to the table.
    ///
    /// `Err` carries the reason it is skipped. Skipping is not a failure.
    fn precondition(&self, _input: &TableInput<'_>) -> Result<(), String> {
        Ok(())
    }

    /// Builds the base class.
    fn build(&self, input: &TableInput<'_>) -> PhpFile;
}

/// Returns the table-level generators in generation order.
pub fn default_kinds() -> Vec<Box<dyn TableFieldGenerator>> {
    vec![
        Box::new(EditField),
        Box::new(DeleteField),
        Box::new(CheckboxField),
        Box::new(OpenInApiField),
    ]
}

/// Starts a base class named `class_name` extending a generic strategy.
pub(crate) fn base_class(input: &TableInput<'_>, class_name: &str, strategy: Strategy) -> PhpFile {
    let mut file = PhpFile::new(field_namespace(input.table, Tier::Base), class_name);
    file.set_extends(strategy.qualified(&input.config.generic_namespace));
    file
}

/// Joins lowercased URL segments into an absolute path, skipping empty ones.
pub(crate) fn url_path<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut url = String::new();
    for segment in segments.into_iter().filter(|s| !s.is_empty()) {
        url.push('/');
        url.push_str(&segment.to_lowercase());
    }
    url
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Builds `kind` for `table` with API exposure configured as given.
    pub fn build(
        kind: &dyn TableFieldGenerator,
        database: &Database,
        table: &Table,
        api: bool,
        has_trait: bool,
    ) -> Result<PhpFile, String> {
        let config = GeneratorConfig::default().api(api);
        let probe = move |_: &str| has_trait;
        let input = TableInput {
            database,
            table,
            config: &config,
            api_probe: &probe,
        };
        kind.precondition(&input)?;
        Ok(kind.build(&input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_path() {
        assert_eq!(url_path(["custom", "Acme", "", "Finance", "invoice"]), "/custom/acme/finance/invoice");
        assert_eq!(url_path(["", ""]), "");
    }

    #[test]
    fn test_default_kind_order() {
        let names: Vec<&str> = default_kinds().iter().map(|k| k.class_name()).collect();
        assert_eq!(names, ["Edit", "Delete", "Checkbox", "OpenInApi"]);
    }
}
