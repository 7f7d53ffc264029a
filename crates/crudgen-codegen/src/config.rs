//! Generator configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the column title in [`GeneratorConfig::required_message`].
pub const LABEL_PLACEHOLDER: &str = "{label}";

/// Configuration for a generation run.
///
/// Built in code with the chained setters, or deserialized from a
/// `crudgen.toml`; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Output root for CRUD classes (`classes/Crud` in a project).
    pub root: PathBuf,
    /// Output root for admin module controllers.
    pub admin_root: PathBuf,
    /// Namespace of the generic field strategies.
    pub generic_namespace: String,
    /// Namespace of the capability interfaces.
    pub interface_namespace: String,
    /// Namespace of the framework core helpers (`Utils`, `DeferredAction`).
    pub core_namespace: String,
    /// Namespace prefix of admin module controllers.
    pub admin_namespace: String,
    /// Whether API exposure is enabled for this run.
    pub api: bool,
    /// Message shown when a required field is missing.
    pub required_message: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("classes/Crud"),
            admin_root: PathBuf::from("admin_modules"),
            generic_namespace: "Crud\\Generic\\Field".to_string(),
            interface_namespace: "Crud".to_string(),
            core_namespace: "Core".to_string(),
            admin_namespace: "AdminModules".to_string(),
            api: false,
            required_message: "The field \"{label}\" is required but has not been filled in."
                .to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CRUD output root.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the admin module output root.
    pub fn admin_root(mut self, admin_root: impl Into<PathBuf>) -> Self {
        self.admin_root = admin_root.into();
        self
    }

    /// Enables or disables API exposure.
    pub fn api(mut self, enabled: bool) -> Self {
        self.api = enabled;
        self
    }

    /// Sets the required-field message template.
    pub fn required_message(mut self, template: impl Into<String>) -> Self {
        self.required_message = template.into();
        self
    }

    /// Returns the CRUD output root.
    pub fn crud_root(&self) -> &Path {
        &self.root
    }

    /// Qualifies a capability interface, e.g. `IEditableField`.
    pub fn interface(&self, name: &str) -> String {
        qualify(&self.interface_namespace, name)
    }

    /// Qualifies a core helper class, e.g. `Utils`.
    pub fn core(&self, name: &str) -> String {
        qualify(&self.core_namespace, name)
    }

    /// Returns the required-field message for a column label.
    pub fn required_message_for(&self, label: &str) -> String {
        self.required_message.replace(LABEL_PLACEHOLDER, label)
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    let namespace = namespace.trim_matches('\\');
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}\\{name}")
    }
}
