//! Typed schema model for the crudgen field generator.
//!
//! The model mirrors the table/column declarations of a propel-style
//! `schema.xml`. Loading and validating that document is the concern of an
//! external loader; this crate only provides the read-only view the generator
//! consumes, plus serde support so a schema can be supplied as TOML.

use std::fmt;
use std::str::FromStr;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form types a column can declare.
///
/// The form type selects which generic field strategy the generated field
/// class extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormType {
    Boolean,
    Lookup,
    ForeignKey,
    Bsn,
    Money,
    Checkbox,
    Integer,
    Email,
    Float,
    Color,
    File,
    Image,
    Icon,
    String,
    Date,
    DateTime,
    Postcode,
    Textarea,
    Url,
    Password,
}

impl FormType {
    /// Every known form type, in declaration order.
    pub const ALL: [FormType; 20] = [
        FormType::Boolean,
        FormType::Lookup,
        FormType::ForeignKey,
        FormType::Bsn,
        FormType::Money,
        FormType::Checkbox,
        FormType::Integer,
        FormType::Email,
        FormType::Float,
        FormType::Color,
        FormType::File,
        FormType::Image,
        FormType::Icon,
        FormType::String,
        FormType::Date,
        FormType::DateTime,
        FormType::Postcode,
        FormType::Textarea,
        FormType::Url,
        FormType::Password,
    ];

    /// Returns the schema tag for this form type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Boolean => "BOOLEAN",
            FormType::Lookup => "LOOKUP",
            FormType::ForeignKey => "FOREIGN_KEY",
            FormType::Bsn => "BSN",
            FormType::Money => "MONEY",
            FormType::Checkbox => "CHECKBOX",
            FormType::Integer => "INTEGER",
            FormType::Email => "EMAIL",
            FormType::Float => "FLOAT",
            FormType::Color => "COLOR",
            FormType::File => "FILE",
            FormType::Image => "IMAGE",
            FormType::Icon => "ICON",
            FormType::String => "STRING",
            FormType::Date => "DATE",
            FormType::DateTime => "DATETIME",
            FormType::Postcode => "POSTCODE",
            FormType::Textarea => "TEXTAREA",
            FormType::Url => "URL",
            FormType::Password => "PASSWORD",
        }
    }
}

impl FromStr for FormType {
    type Err = UnknownFormType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormType::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFormType(s.to_string()))
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tag that names no [`FormType`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown form type: {0}")]
pub struct UnknownFormType(pub String);

/// Problems with a column's declared form type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormTypeError {
    #[error("please set the form tag on field {column}")]
    Missing { column: String },

    #[error("{tag} is not a supported form type for field {column}")]
    Unsupported { tag: String, column: String },
}

/// Where the options of a lookup column come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupDescriptor {
    /// Options are rows of another model, shown by one of its columns.
    Model {
        /// Fully qualified model class, e.g. `Model\Setting\Country`.
        full_class: String,
        /// Column of the referenced model shown to the user.
        visible_column: String,
    },
    /// Options are fetched from an endpoint returning id/label pairs.
    Url {
        /// Endpoint serving the lookup options.
        url: String,
    },
}

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Column {
    /// The column name as declared in the schema.
    pub name: String,
    /// Explicit PHP name; derived from `name` when absent.
    #[serde(default)]
    pub php_name: Option<String>,
    /// Declared form type tag, e.g. `STRING` or `LOOKUP`.
    #[serde(default)]
    pub form: Option<String>,
    /// Human-readable label.
    #[serde(default)]
    pub title: String,
    /// Icon shown next to the field.
    #[serde(default)]
    pub icon: Option<String>,
    /// Placeholder text for the input.
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Whether a value must be submitted.
    #[serde(default)]
    pub required: bool,
    /// Lookup source for `LOOKUP` columns.
    #[serde(default)]
    pub lookup: Option<LookupDescriptor>,
}

impl Column {
    /// Creates a column with the given name and form tag.
    pub fn new(name: impl Into<String>, form: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            form: Some(form.into()),
            ..Self::default()
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Marks the column as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the lookup descriptor.
    pub fn with_lookup(mut self, lookup: LookupDescriptor) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Returns the PHP class name used for this column's field class.
    pub fn class_name(&self) -> String {
        match &self.php_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => to_pascal_case(&self.name),
        }
    }

    /// Returns the label shown to users, falling back to the column name.
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }

    /// Returns the name of the model getter for this column.
    pub fn getter(&self) -> String {
        format!("get{}", self.class_name())
    }

    /// Resolves the declared form tag.
    pub fn form_type(&self) -> Result<FormType, FormTypeError> {
        match self.form.as_deref().map(str::trim) {
            None | Some("") => Err(FormTypeError::Missing {
                column: self.name.clone(),
            }),
            Some(tag) => tag
                .parse()
                .map_err(|UnknownFormType(tag)| FormTypeError::Unsupported {
                    tag,
                    column: self.name.clone(),
                }),
        }
    }
}

/// A unique-key constraint set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UniqueKey {
    /// Columns whose combined values must be unique.
    pub columns: Vec<String>,
}

impl UniqueKey {
    /// Creates a unique key over the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the column belongs to this set.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// An admin module owning one or more tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Module {
    /// Module name, e.g. `Finance`.
    pub name: String,
    /// Directory of the module below the admin tree, e.g. `Finance`.
    pub module_dir: String,
}

impl Module {
    /// Creates a module whose directory equals its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            module_dir: name.clone(),
            name,
        }
    }
}

/// A table declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    /// The table name as declared in the schema.
    pub name: String,
    /// Explicit PHP type name; derived from `name` when absent.
    #[serde(default)]
    pub php_name: Option<String>,
    /// Owning admin module.
    #[serde(default)]
    pub module: Option<Module>,
    /// Sub directory below the CRUD root, e.g. `Custom/NovumSvb`.
    #[serde(default)]
    pub crud_dir: Option<String>,
    /// Tables flagged this way get no CRUD classes.
    #[serde(default)]
    pub skip_cruds: bool,
    /// Columns in declaration order.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Unique-key constraint sets.
    #[serde(default)]
    pub unique: Vec<UniqueKey>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the PHP type name of the table's model.
    pub fn php_name(&self) -> String {
        match &self.php_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => to_pascal_case(&self.name),
        }
    }

    /// Returns the CRUD directory segments, skipping empty ones.
    pub fn crud_dir_segments(&self) -> Vec<&str> {
        self.crud_dir
            .as_deref()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Returns the namespace all CRUD classes of this table live below.
    pub fn crud_namespace(&self) -> String {
        let mut parts = vec!["Crud"];
        parts.extend(self.crud_dir_segments());
        parts.join("\\")
    }

    /// Returns the fully qualified model class of this table.
    pub fn model_class(&self, database: &Database) -> String {
        format!("{}\\{}", database.namespace(), self.php_name())
    }

    /// Returns the columns whose names are not listed in `skip`.
    pub fn columns_except<'a>(&'a self, skip: &'a [&'a str]) -> impl Iterator<Item = &'a Column> {
        self.columns
            .iter()
            .filter(move |c| !skip.contains(&c.name.as_str()))
    }

    /// Looks up a column by name.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns true if the column is part of any unique-key set.
    pub fn is_unique_key(&self, column: &str) -> bool {
        self.unique.iter().any(|u| u.contains(column))
    }
}

/// A database declaration grouping tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Database {
    /// Database name.
    #[serde(default)]
    pub name: String,
    /// Namespace of the generated models.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Customer segment for customer-specific installations.
    #[serde(default)]
    pub custom: Option<String>,
    /// Tables in declaration order.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Database {
    /// Returns the model namespace, defaulting to `Model`.
    pub fn namespace(&self) -> &str {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => ns.trim_matches('\\'),
            _ => "Model",
        }
    }

    /// Returns the customer segment, if one is declared.
    pub fn custom(&self) -> Option<&str> {
        self.custom.as_deref().filter(|c| !c.is_empty())
    }
}

/// The root of a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    /// All databases.
    #[serde(default)]
    pub databases: Vec<Database>,
}

impl Schema {
    /// Creates a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over every table together with its database.
    pub fn tables(&self) -> impl Iterator<Item = (&Database, &Table)> {
        self.databases
            .iter()
            .flat_map(|db| db.tables.iter().map(move |t| (db, t)))
    }
}

/// Converts `snake_case` or `kebab-case` names to PascalCase.
pub fn to_pascal_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_type_round_trip_tags() {
        assert_eq!("LOOKUP".parse::<FormType>(), Ok(FormType::Lookup));
        assert_eq!("DATETIME".parse::<FormType>(), Ok(FormType::DateTime));
        assert_eq!(FormType::ForeignKey.to_string(), "FOREIGN_KEY");
        assert_eq!(
            "lookup".parse::<FormType>(),
            Err(UnknownFormType("lookup".to_string()))
        );
    }

    #[test]
    fn test_column_form_type_errors() {
        let mut column = Column::new("widget", "WIDGET");
        assert_eq!(
            column.form_type(),
            Err(FormTypeError::Unsupported {
                tag: "WIDGET".to_string(),
                column: "widget".to_string(),
            })
        );

        column.form = Some(String::new());
        assert_eq!(
            column.form_type(),
            Err(FormTypeError::Missing {
                column: "widget".to_string()
            })
        );

        column.form = None;
        assert!(matches!(column.form_type(), Err(FormTypeError::Missing { .. })));
    }

    #[test]
    fn test_column_naming() {
        let column = Column::new("created_at", "DATETIME");
        assert_eq!(column.class_name(), "CreatedAt");
        assert_eq!(column.getter(), "getCreatedAt");

        let column = Column {
            php_name: Some("Iban".to_string()),
            ..Column::new("bank_account", "STRING")
        };
        assert_eq!(column.class_name(), "Iban");
    }

    #[test]
    fn test_unique_key_membership() {
        let mut table = Table::new("user");
        table.unique = vec![
            UniqueKey::new(["email"]),
            UniqueKey::new(["username", "tenant_id"]),
        ];

        assert!(table.is_unique_key("email"));
        assert!(table.is_unique_key("username"));
        assert!(table.is_unique_key("tenant_id"));
        assert!(!table.is_unique_key("bio"));
    }

    #[test]
    fn test_table_namespaces() {
        let mut table = Table::new("sale_invoice");
        assert_eq!(table.php_name(), "SaleInvoice");
        assert_eq!(table.crud_namespace(), "Crud");

        table.crud_dir = Some("Custom/NovumSvb".to_string());
        assert_eq!(table.crud_namespace(), "Crud\\Custom\\NovumSvb");

        let database = Database {
            namespace: Some("\\Model\\Custom\\NovumSvb\\".to_string()),
            ..Database::default()
        };
        assert_eq!(
            table.model_class(&database),
            "Model\\Custom\\NovumSvb\\SaleInvoice"
        );
        assert_eq!(table.model_class(&Database::default()), "Model\\SaleInvoice");
    }

    #[test]
    fn test_columns_except_keeps_order() {
        let mut table = Table::new("invoice");
        table.columns = vec![
            Column::new("id", "INTEGER"),
            Column::new("amount", "MONEY"),
            Column::new("due", "DATE"),
        ];

        let names: Vec<_> = table.columns_except(&["id"]).map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["amount", "due"]);
    }

    #[test]
    fn test_schema_from_toml() {
        let source = r#"
            [[databases]]
            name = "shop"
            custom = "acme"

            [[databases.tables]]
            name = "customer"
            crud_dir = "Custom/Acme"
            module = { name = "Crm", module_dir = "Crm" }
            unique = [{ columns = ["email"] }]

            [[databases.tables.columns]]
            name = "email"
            form = "EMAIL"
            title = "E-mail"
            required = true

            [[databases.tables.columns]]
            name = "country_id"
            form = "LOOKUP"
            lookup = { kind = "model", full_class = "Model\\Setting\\Country", visible_column = "name" }
        "#;

        let schema: Schema = toml::from_str(source).unwrap();
        let (database, table) = schema.tables().next().unwrap();

        assert_eq!(database.custom(), Some("acme"));
        assert_eq!(table.module.as_ref().map(|m| m.name.as_str()), Some("Crm"));
        assert!(table.get_column("email").unwrap().required);
        assert!(matches!(
            table.get_column("country_id").unwrap().lookup,
            Some(LookupDescriptor::Model { .. })
        ));
    }
}
