//! "Open in API" link field.

use crate::artifact::{Method, PhpFile};
use crate::kinds::{base_class, TableFieldGenerator, TableInput};
use crate::providers::api_trait_name;
use crate::render::php_double_quoted;
use crate::strategy::Strategy;

/// Generates the `OpenInApi` field.
///
/// Only applies when API exposure is enabled and the table's CRUD namespace
/// provides a `CrudApiTrait`, which the class composes.
pub struct OpenInApiField;

impl TableFieldGenerator for OpenInApiField {
    fn class_name(&self) -> &'static str {
        "OpenInApi"
    }

    fn precondition(&self, input: &TableInput<'_>) -> Result<(), String> {
        if !input.config.api {
            return Err("API exposure is disabled, not making OpenInApi field".to_string());
        }
        if !input.api_probe.has_api_trait(input.table) {
            return Err(format!(
                "{} does not exist, not making OpenInApi field",
                api_trait_name(input.table)
            ));
        }
        Ok(())
    }

    fn build(&self, input: &TableInput<'_>) -> PhpFile {
        let table = input.table;
        let mut file = base_class(input, self.class_name(), Strategy::OpenInApi);
        file.add_comment(
            "This code is generated and should not be modified by hand, your changes will be overwritten at the first re-run.",
        )
        .add_implement(input.config.interface("IFieldHasApi"))
        .add_implement(input.config.interface("IEventField"))
        .add_trait(api_trait_name(table));

        if let Some(module) = &table.module {
            file.add_method(
                Method::new(
                    "getModule",
                    format!("return \"{}\";", php_double_quoted(&module.name)),
                )
                .returns("string"),
            );
        }
        file.add_method(
            Method::new(
                "getModuleDir",
                format!("return \"{}\";", php_double_quoted(&table.php_name())),
            )
            .returns("string"),
        );
        file
    }
}
