//! Skeleton subclasses.
//!
//! A skeleton is an empty final class extending a base class. It is only
//! written when absent, so whatever the user adds to it survives
//! regeneration.

use crudgen_schema::Table;

use crate::artifact::{ClassModifier, PhpFile};
use crate::{field_namespace, Tier};

/// Builds the skeleton of the base field class `class_name`.
///
/// `subject` names what the class represents in the doc comment, e.g.
/// `amount field`.
pub fn build(table: &Table, class_name: &str, subject: &str) -> PhpFile {
    let base = format!("{}\\{class_name}", field_namespace(table, Tier::Base));

    let mut file = PhpFile::new(field_namespace(table, Tier::Skeleton), class_name);
    file.set_extends(base)
        .set_modifier(ClassModifier::Final)
        .add_comment(format!(
            "Skeleton subclass for representing {subject} from the {} table.",
            table.name
        ))
        .add_comment("")
        .add_comment("You should add additional methods to this class to meet the")
        .add_comment("application requirements.  This class will only be generated as")
        .add_comment("long as it does not already exist in the output directory.");
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;

    #[test]
    fn test_skeleton_extends_base() {
        let table = Table::new("invoice");
        let file = build(&table, "Amount", "amount field");

        assert_eq!(file.namespace, "Crud\\Invoice\\Field");
        assert_eq!(file.class.modifier, Some(ClassModifier::Final));
        assert!(file.class.methods.is_empty());
        assert!(file.class.properties.is_empty());

        let source = render(&file);
        assert!(source.contains("use Crud\\Invoice\\Field\\Base\\Amount as BaseAmount;"));
        assert!(source.contains("final class Amount extends BaseAmount"));
        assert!(source.contains("amount field from the invoice table."));
    }
}
