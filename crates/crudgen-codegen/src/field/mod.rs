//! Column field class generation.
//!
//! The base pass builds the abstract class every non-identifier column gets.
//! Feature passes add the lookup and required capabilities on top of it.
//!
//! # Example
//!
//! ```ignore
//! use crudgen_codegen::field::field_stack;
//!
//! let ctx = field_stack().run(&input)?;
//! let source = crudgen_codegen::render::render(&ctx.file);
//! ```

pub mod base;
pub mod passes;

pub use base::FieldBasePass;

use crate::pass::PassManager;

/// Creates a PassManager with the base pass and every feature pass.
pub fn field_stack() -> PassManager {
    let mut pm = PassManager::new();
    pm.add(FieldBasePass);
    pm.add(passes::LookupPass);
    pm.add(passes::RequiredPass);
    pm
}

/// Creates a PassManager with only the base pass.
pub fn base_only() -> PassManager {
    let mut pm = PassManager::new();
    pm.add(FieldBasePass);
    pm
}

#[cfg(test)]
pub(crate) mod test_support {
    use crudgen_schema::{Database, Table};

    use crate::config::GeneratorConfig;
    use crate::lookup::{DefaultLookupFactory, LookupStrategyFactory};
    use crate::pass::{FieldInput, GenerationContext, PassManager};
    use crate::providers::{DefaultCollectionProvider, FieldCollectionProvider};

    /// Runs `pm` for one column of `table` with default collaborators.
    pub fn run(pm: &PassManager, table: &Table, column: &str) -> GenerationContext {
        run_with(pm, table, column, &DefaultLookupFactory::default())
    }

    pub fn run_with(
        pm: &PassManager,
        table: &Table,
        column: &str,
        lookups: &dyn LookupStrategyFactory,
    ) -> GenerationContext {
        let database = Database::default();
        let config = GeneratorConfig::default();
        let column = table.get_column(column).unwrap();
        let input = FieldInput {
            database: &database,
            table,
            column,
            config: &config,
            collection_interface: DefaultCollectionProvider.collection_interface(table),
            lookups,
        };
        pm.run(&input).unwrap()
    }
}
