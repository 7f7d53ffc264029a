//! Pass-based construction of field classes.
//!
//! A base pass builds the class every column gets, feature passes add
//! optional capabilities on top of it. Passes declare their dependencies and
//! the manager runs them in dependency order against one shared context.
//!
//! # Example
//!
//! ```ignore
//! use crudgen_codegen::field::{passes::RequiredPass, FieldBasePass};
//! use crudgen_codegen::pass::PassManager;
//!
//! let mut pm = PassManager::new();
//! pm.add(FieldBasePass);
//! pm.add(RequiredPass);
//!
//! let ctx = pm.run(&input)?;
//! ```

use std::collections::HashMap;

use crudgen_schema::{Column, Database, Table};

use crate::artifact::PhpFile;
use crate::config::GeneratorConfig;
use crate::lookup::LookupStrategyFactory;
use crate::report::Diagnostic;
use crate::CodegenError;

/// Read-only input of one field class generation.
pub struct FieldInput<'a> {
    pub database: &'a Database,
    pub table: &'a Table,
    pub column: &'a Column,
    pub config: &'a GeneratorConfig,
    /// Field-collection interface of the table.
    pub collection_interface: String,
    pub lookups: &'a dyn LookupStrategyFactory,
}

/// Mutable state passed through the pipeline.
///
/// Holds the class under construction and the warnings raised so far.
/// Later passes read what earlier ones built straight from `file`.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    /// The class being built.
    pub file: PhpFile,

    /// Warnings, in the order they were raised.
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationContext {
    /// Creates a new empty generation context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(message));
    }

}

/// A pass that transforms the generation context.
pub trait Pass: Send + Sync {
    /// Unique identifier for this pass.
    fn name(&self) -> &'static str;

    /// Execute the pass, mutating the context.
    fn run(&self, input: &FieldInput<'_>, ctx: &mut GenerationContext) -> Result<(), CodegenError>;

    /// Dependencies: passes that must run before this one.
    ///
    /// Dependencies that are not registered are ignored, so a feature pass
    /// can order itself after another optional pass.
    fn depends_on(&self) -> &[&'static str] {
        &[]
    }
}

/// Manages pass execution order and dependencies.
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PassManager {
    /// Creates a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the pipeline.
    ///
    /// Returns `&mut Self` for method chaining.
    pub fn add<P: Pass + 'static>(&mut self, pass: P) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Run all passes in dependency order against a fresh context.
    pub fn run(&self, input: &FieldInput<'_>) -> Result<GenerationContext, CodegenError> {
        let mut ctx = GenerationContext::new();

        let sorted = self.topological_sort()?;

        for pass_idx in sorted {
            let pass = &self.passes[pass_idx];
            tracing::trace!(pass = pass.name(), column = %input.column.name, "running pass");
            pass.run(input, &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Topologically sort passes by dependencies.
    ///
    /// Passes without an ordering constraint between them keep their
    /// registration order.
    fn topological_sort(&self) -> Result<Vec<usize>, CodegenError> {
        let name_to_idx: HashMap<&str, usize> = self
            .passes
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name(), i))
            .collect();

        let mut in_degree = vec![0usize; self.passes.len()];
        let mut dependents: Vec<Vec<usize>> = vec![vec![]; self.passes.len()];

        for (i, pass) in self.passes.iter().enumerate() {
            for dep_name in pass.depends_on() {
                if let Some(&dep_idx) = name_to_idx.get(dep_name) {
                    dependents[dep_idx].push(i);
                    in_degree[i] += 1;
                }
            }
        }

        // Kahn's algorithm, always taking the lowest ready index.
        let mut ready: Vec<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &d)| d == 0)
            .map(|(i, _)| i)
            .collect();

        let mut result = Vec::with_capacity(self.passes.len());

        while !ready.is_empty() {
            ready.sort_unstable_by(|a, b| b.cmp(a));
            let Some(idx) = ready.pop() else { break };
            result.push(idx);
            for &dependent in &dependents[idx] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.push(dependent);
                }
            }
        }

        if result.len() != self.passes.len() {
            return Err(CodegenError::Custom(
                "Circular dependency detected in passes".to_string(),
            ));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::DefaultLookupFactory;

    struct TestPass {
        name: &'static str,
        deps: &'static [&'static str],
    }

    impl Pass for TestPass {
        fn name(&self) -> &'static str {
            self.name
        }

        fn run(&self, _input: &FieldInput<'_>, ctx: &mut GenerationContext) -> Result<(), CodegenError> {
            ctx.file.add_comment(self.name);
            Ok(())
        }

        fn depends_on(&self) -> &[&'static str] {
            self.deps
        }
    }

    fn run(pm: &PassManager) -> Result<GenerationContext, CodegenError> {
        let database = Database::default();
        let table = Table::new("invoice");
        let column = Column::new("amount", "MONEY");
        let config = GeneratorConfig::default();
        let lookups = DefaultLookupFactory::default();
        let input = FieldInput {
            database: &database,
            table: &table,
            column: &column,
            config: &config,
            collection_interface: "Crud\\Invoice\\ICollectionField".to_string(),
            lookups: &lookups,
        };
        pm.run(&input)
    }

    #[test]
    fn test_generation_context() {
        let mut ctx = GenerationContext::new();

        ctx.warn("bad form");
        assert_eq!(ctx.diagnostics, [Diagnostic::warning("bad form")]);
    }

    #[test]
    fn test_pass_manager_simple() {
        let mut pm = PassManager::new();
        pm.add(TestPass { name: "base", deps: &[] });

        let ctx = run(&pm).unwrap();
        assert_eq!(ctx.file.class.comments, ["base"]);
    }

    #[test]
    fn test_pass_manager_with_dependencies() {
        let mut pm = PassManager::new();
        pm.add(TestPass { name: "required", deps: &["lookup", "base"] });
        pm.add(TestPass { name: "lookup", deps: &["base"] });
        pm.add(TestPass { name: "base", deps: &[] });

        let ctx = run(&pm).unwrap();
        assert_eq!(ctx.file.class.comments, ["base", "lookup", "required"]);
    }

    #[test]
    fn test_missing_dependency_is_ignored() {
        let mut pm = PassManager::new();
        pm.add(TestPass { name: "base", deps: &[] });
        pm.add(TestPass { name: "required", deps: &["lookup", "base"] });

        let ctx = run(&pm).unwrap();
        assert_eq!(ctx.file.class.comments, ["base", "required"]);
    }

    #[test]
    fn test_pass_manager_circular_dependency() {
        let mut pm = PassManager::new();
        pm.add(TestPass { name: "a", deps: &["b"] });
        pm.add(TestPass { name: "b", deps: &["a"] });

        assert!(run(&pm).is_err());
    }
}
