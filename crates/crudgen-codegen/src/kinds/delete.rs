//! Delete and undelete link field.

use crate::artifact::{ClassModifier, Method, Parameter, PhpFile};
use crate::kinds::{base_class, url_path, TableFieldGenerator, TableInput};
use crate::render::php_double_quoted;
use crate::strategy::Strategy;

/// Generates the abstract `Delete` field.
///
/// Both URL methods only answer for instances of the table's model and
/// return an empty string for anything else.
pub struct DeleteField;

fn guarded_url(model: &str, url: &str) -> String {
    [
        format!("if ($oObject instanceof {model}) {{"),
        format!("    return \"{}\" . $oObject->getId();", php_double_quoted(url)),
        "}".to_string(),
        "return '';".to_string(),
    ]
    .join("\n")
}

impl TableFieldGenerator for DeleteField {
    fn class_name(&self) -> &'static str {
        "Delete"
    }

    fn build(&self, input: &TableInput<'_>) -> PhpFile {
        let table = input.table;
        let model_class = table.model_class(input.database);

        let mut file = base_class(input, self.class_name(), Strategy::Delete);
        file.add_use(model_class.as_str())
            .add_implement(input.config.interface("IEventField"))
            .set_modifier(ClassModifier::Abstract);
        let model = file.resolve_name(&model_class);

        let mut delete_segments = table.crud_dir_segments();
        if let Some(module) = &table.module {
            delete_segments.push(module.name.as_str());
        }
        delete_segments.push(table.name.as_str());
        delete_segments.push("overview");
        let delete_url = format!("{}?_do=ConfirmDelete&id=", url_path(delete_segments));

        let mut undelete_segments = table.crud_dir_segments();
        undelete_segments.push(table.name.as_str());
        let undelete_url = format!("{}?_do=UnDelete&id=", url_path(undelete_segments));

        file.add_method(
            Method::new("getDeleteUrl", guarded_url(&model, &delete_url))
                .param(Parameter::nullable("oObject")),
        )
        .add_method(Method::new("getIcon", "return \"trash\";").returns("string"))
        .add_method(
            Method::new("getUnDeleteUrl", guarded_url(&model, &undelete_url))
                .param(Parameter::nullable("oObject")),
        );
        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::test_support;
    use crudgen_schema::{Database, Module, Table};

    #[test]
    fn test_delete_urls() {
        let mut table = Table::new("invoice");
        table.module = Some(Module::new("Finance"));

        let file = test_support::build(&DeleteField, &Database::default(), &table, false, false).unwrap();
        assert_eq!(file.class.modifier, Some(ClassModifier::Abstract));
        assert!(file.uses.contains(&"Model\\Invoice".to_string()));

        let delete = &file.class.method("getDeleteUrl").unwrap().body;
        assert!(delete.starts_with("if ($oObject instanceof Invoice) {"));
        assert!(delete.contains("\"/finance/invoice/overview?_do=ConfirmDelete&id=\""));
        assert!(delete.ends_with("return '';"));

        let undelete = &file.class.method("getUnDeleteUrl").unwrap().body;
        assert!(undelete.contains("\"/invoice?_do=UnDelete&id=\""));

        assert_eq!(
            file.class.method("getIcon").map(|m| m.body.as_str()),
            Some("return \"trash\";")
        );
    }

    #[test]
    fn test_crud_dir_prefixes_urls() {
        let mut table = Table::new("invoice");
        table.crud_dir = Some("Custom/Acme".to_string());

        let file = test_support::build(&DeleteField, &Database::default(), &table, false, false).unwrap();
        let undelete = &file.class.method("getUnDeleteUrl").unwrap().body;
        assert!(undelete.contains("\"/custom/acme/invoice?_do=UnDelete&id=\""));
    }
}
