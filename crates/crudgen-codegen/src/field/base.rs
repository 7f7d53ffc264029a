//! Base pass - builds the abstract field class of a column.

use crate::artifact::{ClassModifier, Method, Parameter, PhpFile, Visibility};
use crate::pass::{FieldInput, GenerationContext, Pass};
use crate::strategy;
use crate::{field_namespace, CodegenError, Tier};

/// Field base pass.
///
/// Creates the class in the `Base` namespace, extending the generic
/// strategy of the column's form type. A missing or unknown form type falls
/// back to the string strategy and leaves a warning in the context.
///
/// Every class gets the filterable and editable interfaces, the table's
/// collection interface, `sanitize`, `isUniqueKey` and six protected
/// properties describing the column.
pub struct FieldBasePass;

impl Pass for FieldBasePass {
    fn name(&self) -> &'static str {
        "field-base"
    }

    fn run(&self, input: &FieldInput<'_>, ctx: &mut GenerationContext) -> Result<(), CodegenError> {
        let FieldInput {
            database,
            table,
            column,
            config,
            ..
        } = input;

        let (strategy, error) = strategy::resolve_or_fallback(column);
        if let Some(error) = error {
            ctx.warn(format!("{error}, using {}", strategy.class_name()));
        }
        tracing::debug!(
            table = %table.name,
            column = %column.name,
            strategy = strategy.class_name(),
            "resolved field strategy"
        );

        let mut file = PhpFile::new(field_namespace(table, Tier::Base), column.class_name());
        file.set_extends(strategy.qualified(&config.generic_namespace))
            .add_implement(config.interface("IFilterableField"))
            .add_implement(config.interface("IEditableField"))
            .add_implement(input.collection_interface.as_str())
            .add_comment(format!(
                "Base class that represents the '{}' crud field from the '{}' table.",
                column.name, table.name
            ))
            .add_comment("This class is auto generated and should not be modified.")
            .set_modifier(ClassModifier::Abstract);

        file.add_method(
            Method::new("sanitize", "return parent::sanitize($value);").param(Parameter::new("value")),
        );

        let unique = table.is_unique_key(&column.name);
        file.add_method(Method::new("isUniqueKey", format!("return {unique};")).returns("bool"));

        file.add_property("sFieldName", column.name.as_str(), Visibility::Protected)
            .add_property("sFieldLabel", column.label(), Visibility::Protected)
            .add_property("sIcon", column.icon.clone(), Visibility::Protected)
            .add_property("sPlaceHolder", column.placeholder.clone(), Visibility::Protected)
            .add_property("sGetter", column.getter(), Visibility::Protected)
            .add_property("sFqModelClassname", table.model_class(database), Visibility::Protected);

        ctx.file = file;

        Ok(())
    }
}
