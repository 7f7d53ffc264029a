//! Lookup pass for `LOOKUP` columns.

use crudgen_schema::FormType;

use crate::artifact::{Method, Parameter};
use crate::pass::{FieldInput, GenerationContext, Pass};
use crate::CodegenError;

/// Adds the lookup capability to `LOOKUP` columns.
///
/// The method bodies come from the lookup factory. When the factory fails
/// the whole capability is left out and a warning is recorded; the rest of
/// the class is still generated.
pub struct LookupPass;

impl Pass for LookupPass {
    fn name(&self) -> &'static str {
        "lookup"
    }

    fn depends_on(&self) -> &[&'static str] {
        &["field-base"]
    }

    fn run(&self, input: &FieldInput<'_>, ctx: &mut GenerationContext) -> Result<(), CodegenError> {
        let column = input.column;
        if column.form_type() != Ok(FormType::Lookup) {
            return Ok(());
        }

        // The factory imports into a copy so a failure leaves no stray uses.
        let mut file = ctx.file.clone();
        let bodies = match input.lookups.create(column, &mut file) {
            Ok(bodies) => bodies,
            Err(e) => {
                ctx.warn(format!("Could not generate lookups for field {}: {e}", column.name));
                return Ok(());
            }
        };

        file.add_implement(input.config.interface("IFilterableLookupField"))
            .add_method(
                Method::new("getLookups", bodies.get_lookups)
                    .param(Parameter::nullable("mSelectedItem")),
            )
            .add_method(
                Method::new("getVisibleValue", bodies.get_visible_value)
                    .param(Parameter::nullable("iItemId")),
            )
            .add_method(Method::new("getDataType", "return 'lookup';").returns("string"));
        ctx.file = file;

        Ok(())
    }
}
