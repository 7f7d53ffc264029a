//! Edit link field.

use crate::artifact::{Method, Parameter, PhpFile};
use crate::kinds::{base_class, url_path, TableFieldGenerator, TableInput};
use crate::render::php_double_quoted;
use crate::strategy::Strategy;

/// Generates the `Edit` field linking a row to its edit form.
///
/// Customer installations (a database with a `custom` segment) get URLs
/// below `/custom/<customer>`.
pub struct EditField;

impl EditField {
    fn edit_url(input: &TableInput<'_>) -> String {
        let table = input.table;
        let module_dir = table.module.as_ref().map_or("", |m| m.module_dir.as_str());
        let segments = match input.database.custom() {
            Some(custom) => vec!["custom", custom, module_dir, table.name.as_str()],
            None => vec![module_dir, table.name.as_str()],
        };
        format!("{}/edit?id=", url_path(segments))
    }
}

impl TableFieldGenerator for EditField {
    fn class_name(&self) -> &'static str {
        "Edit"
    }

    fn build(&self, input: &TableInput<'_>) -> PhpFile {
        let config = input.config;
        let mut file = base_class(input, self.class_name(), Strategy::Edit);

        let utils = config.core("Utils");
        let deferred = config.core("DeferredAction");
        file.add_use(utils.as_str())
            .add_use(deferred.as_str())
            .add_implement(config.interface("IEventField"));

        let body = [
            format!(
                "{}::register('overview_url', {}::getRequestUri());",
                file.resolve_name(&deferred),
                file.resolve_name(&utils)
            ),
            format!(
                "return \"{}\" . $oObject->getId();",
                php_double_quoted(&Self::edit_url(input))
            ),
        ]
        .join("\n");

        file.add_method(Method::new("getEditUrl", body).param(Parameter::new("oObject")))
            .add_method(Method::new("getIcon", "return \"edit\";").returns("string"));
        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::test_support;
    use crudgen_schema::{Database, Module, Table};

    fn invoice() -> Table {
        let mut table = Table::new("invoice");
        table.module = Some(Module::new("Finance"));
        table
    }

    #[test]
    fn test_default_url() {
        let file = test_support::build(&EditField, &Database::default(), &invoice(), false, false).unwrap();
        let body = &file.class.method("getEditUrl").unwrap().body;

        assert!(body.contains("DeferredAction::register('overview_url', Utils::getRequestUri());"));
        assert!(body.contains("return \"/finance/invoice/edit?id=\" . $oObject->getId();"));
        assert_eq!(
            file.class.extends.as_deref(),
            Some("Crud\\Generic\\Field\\GenericEdit")
        );
        assert_eq!(file.class.implements, ["Crud\\IEventField"]);
        assert_eq!(
            file.class.method("getIcon").map(|m| m.body.as_str()),
            Some("return \"edit\";")
        );
    }

    #[test]
    fn test_customer_url() {
        let database = Database {
            custom: Some("NovumSvb".to_string()),
            ..Database::default()
        };
        let file = test_support::build(&EditField, &database, &invoice(), false, false).unwrap();
        let body = &file.class.method("getEditUrl").unwrap().body;

        assert!(body.contains("\"/custom/novumsvb/finance/invoice/edit?id=\""));
    }

    #[test]
    fn test_url_without_module() {
        let table = Table::new("invoice");
        let file = test_support::build(&EditField, &Database::default(), &table, false, false).unwrap();
        let body = &file.class.method("getEditUrl").unwrap().body;

        assert!(body.contains("\"/invoice/edit?id=\""));
    }
}
