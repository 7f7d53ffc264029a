//! Collaborators the engine asks about things it does not generate itself.

use std::path::PathBuf;

use crudgen_schema::Table;

/// Returns the field-collection interface a table's field classes implement.
pub trait FieldCollectionProvider: Send + Sync {
    fn collection_interface(&self, table: &Table) -> String;
}

/// Names the interface `<crud namespace>\<Type>\ICollectionField`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCollectionProvider;

impl FieldCollectionProvider for DefaultCollectionProvider {
    fn collection_interface(&self, table: &Table) -> String {
        format!("{}\\{}\\ICollectionField", table.crud_namespace(), table.php_name())
    }
}

/// Returns the fully qualified API trait of a table's CRUD namespace.
pub fn api_trait_name(table: &Table) -> String {
    format!("{}\\CrudApiTrait", table.crud_namespace())
}

/// Answers whether a table's CRUD namespace exposes an API trait.
pub trait ApiTraitProbe: Send + Sync {
    fn has_api_trait(&self, table: &Table) -> bool;
}

/// Looks for `<root>/<crud dir>/CrudApiTrait.php` on disk.
#[derive(Debug, Clone)]
pub struct FsApiTraitProbe {
    root: PathBuf,
}

impl FsApiTraitProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ApiTraitProbe for FsApiTraitProbe {
    fn has_api_trait(&self, table: &Table) -> bool {
        let mut path = self.root.clone();
        for segment in table.crud_dir_segments() {
            path.push(segment);
        }
        path.push("CrudApiTrait.php");
        path.is_file()
    }
}

/// Any `Fn(&str) -> bool` over the trait name works as a probe.
impl<F> ApiTraitProbe for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn has_api_trait(&self, table: &Table) -> bool {
        self(&api_trait_name(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_interface() {
        let mut table = Table::new("invoice");
        table.crud_dir = Some("Custom/Acme".to_string());
        assert_eq!(
            DefaultCollectionProvider.collection_interface(&table),
            "Crud\\Custom\\Acme\\Invoice\\ICollectionField"
        );
    }

    #[test]
    fn test_fs_probe() {
        let dir = tempfile::tempdir().unwrap();
        let table = Table::new("invoice");
        let probe = FsApiTraitProbe::new(dir.path());
        assert!(!probe.has_api_trait(&table));

        std::fs::write(dir.path().join("CrudApiTrait.php"), "<?php\n").unwrap();
        assert!(probe.has_api_trait(&table));
    }

    #[test]
    fn test_closure_probe() {
        let probe = |name: &str| name == "Crud\\CrudApiTrait";
        assert!(probe.has_api_trait(&Table::new("invoice")));
    }
}
