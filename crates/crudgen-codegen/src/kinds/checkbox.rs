//! Row selection checkbox field.

use crate::artifact::PhpFile;
use crate::kinds::{base_class, TableFieldGenerator, TableInput};
use crate::strategy::Strategy;

/// Generates the `Checkbox` field. All behavior is inherited.
pub struct CheckboxField;

impl TableFieldGenerator for CheckboxField {
    fn class_name(&self) -> &'static str {
        "Checkbox"
    }

    fn build(&self, input: &TableInput<'_>) -> PhpFile {
        let mut file = base_class(input, self.class_name(), Strategy::Checkbox);
        file.add_implement(input.config.interface("IField"))
            .add_implement(input.config.interface("IEventField"));
        file
    }
}
