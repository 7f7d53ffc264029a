//! Required-field validation pass.

use crate::artifact::{Method, Parameter};
use crate::pass::{FieldInput, GenerationContext, Pass};
use crate::render::php_string;
use crate::CodegenError;

/// Adds `validate` to every field class.
///
/// Required columns also get the required-field interface, `hasValidations`
/// and a `validate` that reports the missing field. Other columns simply
/// return the parent's result.
pub struct RequiredPass;

impl Pass for RequiredPass {
    fn name(&self) -> &'static str {
        "required"
    }

    fn depends_on(&self) -> &[&'static str] {
        &["field-base", "lookup"]
    }

    fn run(&self, input: &FieldInput<'_>, ctx: &mut GenerationContext) -> Result<(), CodegenError> {
        let column = input.column;
        let file = &mut ctx.file;

        if !column.required {
            file.add_method(
                Method::new("validate", "return parent::validate($aPostedData);")
                    .param(Parameter::new("aPostedData")),
            );
            return Ok(());
        }

        let message = input.config.required_message_for(column.label());
        let body = [
            "$mResponse = false;".to_string(),
            "$mParentResponse = parent::validate($aPostedData);".to_string(),
            String::new(),
            format!("if (!isset($aPostedData[{}])) {{", php_string(&column.name)),
            "    $mResponse = [];".to_string(),
            format!("    $mResponse[] = {};", php_string(&message)),
            "}".to_string(),
            "if (!empty($mParentResponse)) {".to_string(),
            "    $mResponse = array_merge($mResponse ?: [], $mParentResponse);".to_string(),
            "}".to_string(),
            "return $mResponse;".to_string(),
        ]
        .join("\n");

        file.add_implement(input.config.interface("IRequiredField"))
            .add_method(Method::new("hasValidations", "return true;"))
            .add_method(Method::new("validate", body).param(Parameter::new("aPostedData")));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::field::{field_stack, test_support};
    use crudgen_schema::{Column, Table};

    fn accounts() -> Table {
        let mut table = Table::new("account");
        table.columns = vec![
            Column::new("email", "EMAIL").with_title("Email address").required(),
            Column::new("bio", "TEXTAREA").with_title("Biography"),
        ];
        table
    }

    #[test]
    fn test_required_validate_body() {
        let ctx = test_support::run(&field_stack(), &accounts(), "email");
        let class = &ctx.file.class;

        assert!(class.implements.contains(&"Crud\\IRequiredField".to_string()));
        assert_eq!(
            class.method("hasValidations").map(|m| m.body.as_str()),
            Some("return true;")
        );

        let validate = class.method("validate").unwrap();
        assert!(validate.body.contains("$aPostedData['email']"));
        assert!(validate.body.contains("Email address"));
        assert!(validate.body.contains("parent::validate($aPostedData)"));
    }

    #[test]
    fn test_optional_validate_shortcuts_to_parent() {
        let ctx = test_support::run(&field_stack(), &accounts(), "bio");
        let class = &ctx.file.class;

        assert!(!class.implements.contains(&"Crud\\IRequiredField".to_string()));
        assert!(!class.has_method("hasValidations"));
        assert_eq!(
            class.method("validate").map(|m| m.body.as_str()),
            Some("return parent::validate($aPostedData);")
        );
    }

    #[test]
    fn test_required_lookup_keeps_single_interfaces() {
        let mut table = Table::new("order");
        table.columns = vec![Column::new("status", "LOOKUP")
            .required()
            .with_lookup(crudgen_schema::LookupDescriptor::Url {
                url: "/api/status".to_string(),
            })];

        let ctx = test_support::run(&field_stack(), &table, "status");
        let implements = &ctx.file.class.implements;
        let mut deduped = implements.clone();
        deduped.dedup();
        assert_eq!(implements, &deduped);
        assert!(implements.contains(&"Crud\\IFilterableLookupField".to_string()));
        assert!(implements.contains(&"Crud\\IRequiredField".to_string()));
        assert_eq!(ctx.file.uses.iter().filter(|u| u.as_str() == "Core\\Utils").count(), 1);
    }
}
