//! The generation engine.
//!
//! Tables are generated one at a time, in schema order. Within a table the
//! column fields come first, in declaration order, followed by the table
//! kinds (Edit, Delete, Checkbox, OpenInApi) and the overview controller.

use std::path::Path;

use crudgen_schema::{Database, Schema, Table};

use crate::config::GeneratorConfig;
use crate::field::field_stack;
use crate::kinds::{default_kinds, TableFieldGenerator, TableInput};
use crate::lookup::{DefaultLookupFactory, LookupStrategyFactory};
use crate::pass::{FieldInput, PassManager};
use crate::providers::{ApiTraitProbe, DefaultCollectionProvider, FieldCollectionProvider, FsApiTraitProbe};
use crate::render::render;
use crate::report::{Diagnostic, FileRecord, TableReport};
use crate::write::{write_file, Tier};
use crate::{field_path, overview, skeleton, CodegenError, GeneratedFile};

/// Columns that never get a field class.
const IDENTIFIER_COLUMNS: &[&str] = &["id"];

/// Generates CRUD field classes for tables.
pub struct CrudFieldGenerator {
    config: GeneratorConfig,
    passes: PassManager,
    kinds: Vec<Box<dyn TableFieldGenerator>>,
    lookups: Box<dyn LookupStrategyFactory>,
    collections: Box<dyn FieldCollectionProvider>,
    api_probe: Box<dyn ApiTraitProbe>,
}

impl CrudFieldGenerator {
    /// Creates a generator with the default passes and collaborators.
    ///
    /// The API trait probe looks for `CrudApiTrait.php` below the
    /// configured root.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            passes: field_stack(),
            kinds: default_kinds(),
            lookups: Box::new(DefaultLookupFactory::new(&config)),
            collections: Box::new(DefaultCollectionProvider),
            api_probe: Box::new(FsApiTraitProbe::new(config.root.clone())),
            config,
        }
    }

    /// Replaces the field pass pipeline.
    pub fn with_passes(mut self, passes: PassManager) -> Self {
        self.passes = passes;
        self
    }

    /// Replaces the lookup factory.
    pub fn with_lookups(mut self, lookups: impl LookupStrategyFactory + 'static) -> Self {
        self.lookups = Box::new(lookups);
        self
    }

    /// Replaces the field-collection interface provider.
    pub fn with_collections(mut self, collections: impl FieldCollectionProvider + 'static) -> Self {
        self.collections = Box::new(collections);
        self
    }

    /// Replaces the API trait probe.
    pub fn with_api_probe(mut self, probe: impl ApiTraitProbe + 'static) -> Self {
        self.api_probe = Box::new(probe);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates every table of the schema.
    ///
    /// Stops at the first table that fails with an I/O error; files written
    /// for earlier tables stay on disk.
    pub fn generate_schema(&self, schema: &Schema) -> Result<Vec<TableReport>, CodegenError> {
        schema
            .tables()
            .map(|(database, table)| self.generate_table(database, table))
            .collect()
    }

    /// Generates all field classes of one table.
    pub fn generate_table(&self, database: &Database, table: &Table) -> Result<TableReport, CodegenError> {
        let _span = tracing::info_span!("table", name = %table.name).entered();
        let mut report = TableReport::new(table.name.as_str());

        if table.skip_cruds {
            report.push(Diagnostic::info(format!(
                "Skipping table {}, cruds are disabled for it",
                table.name
            )));
            return Ok(report);
        }

        let collection_interface = self.collections.collection_interface(table);
        for column in table.columns_except(IDENTIFIER_COLUMNS) {
            let input = FieldInput {
                database,
                table,
                column,
                config: &self.config,
                collection_interface: collection_interface.clone(),
                lookups: self.lookups.as_ref(),
            };
            let ctx = self.passes.run(&input)?;
            for diagnostic in ctx.diagnostics {
                report.push(diagnostic);
            }

            let class_name = column.class_name();
            let subject = format!("{} field", column.name);
            self.write_pair(&mut report, table, &class_name, render(&ctx.file), &subject)?;
        }

        let input = TableInput {
            database,
            table,
            config: &self.config,
            api_probe: self.api_probe.as_ref(),
        };
        for kind in &self.kinds {
            if let Err(reason) = kind.precondition(&input) {
                report.push(Diagnostic::info(reason));
                continue;
            }
            let class_name = kind.class_name();
            let subject = format!("{class_name} field");
            let base = render(&kind.build(&input));
            self.write_pair(&mut report, table, class_name, base, &subject)?;
        }

        if let Some((path, file)) = overview::build(table, &self.config) {
            let file = GeneratedFile::new(path, render(&file), Tier::Skeleton);
            write(&mut report, &self.config.admin_root, &file)?;
        }

        Ok(report)
    }

    /// Writes a base class and, if absent, its skeleton.
    fn write_pair(
        &self,
        report: &mut TableReport,
        table: &Table,
        class_name: &str,
        base: String,
        subject: &str,
    ) -> Result<(), CodegenError> {
        let root = self.config.crud_root();

        let file = GeneratedFile::new(field_path(table, class_name, Tier::Base), base, Tier::Base);
        write(report, root, &file)?;

        let content = render(&skeleton::build(table, class_name, subject));
        let file = GeneratedFile::new(field_path(table, class_name, Tier::Skeleton), content, Tier::Skeleton);
        write(report, root, &file)
    }
}

fn write(report: &mut TableReport, root: &Path, file: &GeneratedFile) -> Result<(), CodegenError> {
    let (path, outcome) = write_file(root, file)?;
    report.record(FileRecord {
        path,
        tier: file.tier,
        outcome,
    });
    Ok(())
}
