//! Overview controller skeletons for tables that belong to an admin module.

use std::path::PathBuf;

use crudgen_schema::Table;

use crate::artifact::{ClassModifier, PhpFile};
use crate::config::GeneratorConfig;

/// Returns the namespace of a table's overview controller.
pub fn controller_namespace(table: &Table, config: &GeneratorConfig) -> Option<String> {
    let module = table.module.as_ref()?;
    let mut parts: Vec<&str> = vec![config.admin_namespace.trim_matches('\\')];
    parts.extend(module.module_dir.split('/').filter(|s| !s.is_empty()));
    let php_name = table.php_name();
    parts.push(&php_name);
    Some(parts.into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join("\\"))
}

/// Builds the controller skeleton and its path relative to the admin root.
///
/// Returns `None` for tables without a module.
pub fn build(table: &Table, config: &GeneratorConfig) -> Option<(PathBuf, PhpFile)> {
    let module = table.module.as_ref()?;
    let namespace = controller_namespace(table, config)?;

    let mut file = PhpFile::new(namespace.as_str(), "OverviewController");
    file.set_extends(format!("{namespace}\\Base\\OverviewController"))
        .set_modifier(ClassModifier::Final)
        .add_comment(format!(
            "Skeleton subclass for drawing a list of {} records.",
            table.php_name()
        ))
        .add_comment("")
        .add_comment("You should add additional methods to this class to meet the")
        .add_comment("application requirements.  This class will only be generated as")
        .add_comment("long as it does not already exist in the output directory.");

    let mut path = PathBuf::new();
    for segment in module.module_dir.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(table.php_name());
    path.push("OverviewController.php");

    Some((path, file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crudgen_schema::Module;

    #[test]
    fn test_no_module_no_controller() {
        assert!(build(&Table::new("invoice"), &GeneratorConfig::default()).is_none());
    }

    #[test]
    fn test_controller_skeleton() {
        let mut table = Table::new("invoice");
        table.module = Some(Module::new("Finance"));

        let (path, file) = build(&table, &GeneratorConfig::default()).unwrap();
        assert_eq!(path, PathBuf::from("Finance/Invoice/OverviewController.php"));
        assert_eq!(file.namespace, "AdminModules\\Finance\\Invoice");

        let source = render(&file);
        assert!(source.contains(
            "final class OverviewController extends BaseOverviewController"
        ));
        assert!(source.contains("drawing a list of Invoice records."));
    }
}
