//! crudgen CLI tool.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crudgen_codegen::strategy::{self, Strategy};
use crudgen_codegen::{CrudFieldGenerator, GeneratorConfig, WriteOutcome};
use crudgen_schema::{FormType, Schema};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(author, version, about = "Generates PHP CRUD field classes from a table schema", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate field classes for every table of a schema
    Generate {
        /// Schema file (TOML)
        #[arg(short, long)]
        schema: PathBuf,

        /// Output root for CRUD classes
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Output root for admin module controllers
        #[arg(long)]
        admin_root: Option<PathBuf>,

        /// Generator configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable API exposure (OpenInApi fields)
        #[arg(long)]
        api: bool,
    },

    /// Load a schema and report form type problems without writing anything
    Check {
        /// Schema file (TOML)
        #[arg(short, long)]
        schema: PathBuf,
    },

    /// List the supported form types and the strategies they map to
    FormTypes,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            schema,
            root,
            admin_root,
            config,
            api,
        } => run_generate(&schema, root, admin_root, config.as_deref(), api),
        Commands::Check { schema } => run_check(&schema),
        Commands::FormTypes => {
            run_form_types();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_schema(path: &Path) -> Result<Schema> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    toml::from_str(&source).with_context(|| format!("failed to parse schema {}", path.display()))
}

/// Loads the configuration file, if any, and applies command-line overrides.
fn load_config(
    path: Option<&Path>,
    root: Option<PathBuf>,
    admin_root: Option<PathBuf>,
    api: bool,
) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str(&source)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(root) = root {
        config.root = root;
    }
    if let Some(admin_root) = admin_root {
        config.admin_root = admin_root;
    }
    if api {
        config.api = true;
    }
    Ok(config)
}

fn run_generate(
    schema_path: &Path,
    root: Option<PathBuf>,
    admin_root: Option<PathBuf>,
    config_path: Option<&Path>,
    api: bool,
) -> Result<()> {
    let schema = load_schema(schema_path)?;
    let config = load_config(config_path, root, admin_root, api)?;
    tracing::debug!(?config, "loaded generator configuration");
    let root = config.root.clone();

    let reports = CrudFieldGenerator::new(config).generate_schema(&schema)?;

    let mut written = 0;
    let mut skipped = 0;
    let mut warnings = 0;
    for report in &reports {
        written += report.written();
        skipped += report
            .files
            .iter()
            .filter(|f| f.outcome == WriteOutcome::SkippedExisting)
            .count();
        warnings += report.warnings().count();
    }

    println!(
        "Generated {} files for {} tables to {} ({} existing skeletons kept, {} warnings)",
        written,
        reports.len(),
        root.display(),
        skipped,
        warnings
    );

    Ok(())
}

fn run_check(schema_path: &Path) -> Result<()> {
    let schema = load_schema(schema_path)?;
    let filename = schema_path.display();

    let mut problems = 0;
    let mut tables = 0;
    for (_, table) in schema.tables() {
        tables += 1;
        if table.skip_cruds {
            continue;
        }
        for column in &table.columns {
            if let Err(e) = strategy::resolve(column) {
                problems += 1;
                println!("  {}.{}: {}", table.name, column.name, e);
            }
        }
    }

    if problems == 0 {
        println!("✓ {filename} is valid");
        println!("  {tables} tables");
        Ok(())
    } else {
        anyhow::bail!("{filename} has {problems} form type problems")
    }
}

fn run_form_types() {
    println!("Supported form types:");
    for form in FormType::ALL {
        println!("  {:<12} {}", form.as_str(), Strategy::from(form).class_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
        [[databases]]
        name = "shop"

        [[databases.tables]]
        name = "invoice"
        module = { name = "Finance", module_dir = "Finance" }

        [[databases.tables.columns]]
        name = "id"
        form = "INTEGER"

        [[databases.tables.columns]]
        name = "amount"
        form = "MONEY"
        title = "Amount"
        required = true
    "#;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crudgen.toml");
        std::fs::write(&path, "root = \"out/Crud\"\nrequired_message = \"{label}!\"\n").unwrap();

        let config = load_config(Some(path.as_path()), None, Some(PathBuf::from("admin")), true).unwrap();
        assert_eq!(config.root, PathBuf::from("out/Crud"));
        assert_eq!(config.admin_root, PathBuf::from("admin"));
        assert_eq!(config.required_message_for("Amount"), "Amount!");
        assert!(config.api);
        assert_eq!(config.generic_namespace, "Crud\\Generic\\Field");
    }

    #[test]
    fn test_generate_and_check() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.toml");
        std::fs::write(&schema, SCHEMA).unwrap();

        let root = dir.path().join("classes/Crud");
        run_generate(
            &schema,
            Some(root.clone()),
            Some(dir.path().join("admin_modules")),
            None,
            false,
        )
        .unwrap();
        assert!(root.join("Invoice/Field/Base/Amount.php").is_file());

        assert!(run_check(&schema).is_ok());
    }

    #[test]
    fn test_check_reports_bad_form() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.toml");
        std::fs::write(&schema, SCHEMA.replace("MONEY", "WIDGET")).unwrap();

        assert!(run_check(&schema).is_err());
    }
}
