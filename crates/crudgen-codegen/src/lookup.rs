//! Lookup strategies for `LOOKUP` columns.
//!
//! A lookup factory turns a column's [`LookupDescriptor`] into the bodies of
//! the two lookup methods of the generated field class. It imports the
//! helper classes the bodies call into the class file and spells them the
//! way that file resolves them. Failure is an ordinary [`Result`]; the
//! lookup pass decides what to do with it.

use crudgen_schema::{to_pascal_case, Column, LookupDescriptor};
use thiserror::Error;

use crate::artifact::PhpFile;
use crate::config::GeneratorConfig;
use crate::render::php_string;

/// Why a lookup could not be generated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("field {column} has no lookup descriptor")]
    MissingDescriptor { column: String },

    #[error("lookup of field {column} is incomplete: {reason}")]
    Incomplete { column: String, reason: String },
}

/// Generated lookup method bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupBodies {
    /// Body of `getLookups($mSelectedItem = null)`.
    pub get_lookups: String,
    /// Body of `getVisibleValue($iItemId = null)`.
    pub get_visible_value: String,
}

/// Produces lookup method bodies for a column.
pub trait LookupStrategyFactory: Send + Sync {
    /// Builds the bodies for `column`, importing what they reference into
    /// `file`.
    ///
    /// Names in the bodies must go through [`PhpFile::resolve_name`] after
    /// the import, since a clashing short name gets aliased.
    fn create(&self, column: &Column, file: &mut PhpFile) -> Result<LookupBodies, LookupError>;
}

/// Lookup factory for model-backed and URL-backed lookups.
pub struct DefaultLookupFactory {
    utils: String,
}

impl DefaultLookupFactory {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            utils: config.core("Utils"),
        }
    }

    fn model_lookup(
        &self,
        column: &Column,
        file: &mut PhpFile,
        full_class: &str,
        visible_column: &str,
    ) -> Result<LookupBodies, LookupError> {
        let full_class = full_class.trim_matches('\\');
        if full_class.is_empty() {
            return Err(incomplete(column, "full_class is empty"));
        }
        if visible_column.is_empty() {
            return Err(incomplete(column, "visible_column is empty"));
        }

        let query_class = format!("{full_class}Query");
        file.add_use(query_class.as_str()).add_use(self.utils.as_str());
        let query = file.resolve_name(&query_class);
        let utils = file.resolve_name(&self.utils);

        let visible = to_pascal_case(visible_column);
        let getter = format!("get{visible}");

        let get_lookups = [
            format!("$aAllRows = {query}::create()->orderBy{visible}()->find();"),
            format!(
                "return {utils}::makeSelectOptions($aAllRows, {}, $mSelectedItem);",
                php_string(&getter)
            ),
        ]
        .join("\n");

        let get_visible_value = [
            "if (!$iItemId) {".to_string(),
            "    return null;".to_string(),
            "}".to_string(),
            format!("$oItem = {query}::create()->findOneById($iItemId);"),
            format!("return $oItem ? $oItem->{getter}() : null;"),
        ]
        .join("\n");

        Ok(LookupBodies {
            get_lookups,
            get_visible_value,
        })
    }

    fn url_lookup(
        &self,
        column: &Column,
        file: &mut PhpFile,
        url: &str,
    ) -> Result<LookupBodies, LookupError> {
        if url.trim().is_empty() {
            return Err(incomplete(column, "url is empty"));
        }
        let url = php_string(url);
        file.add_use(self.utils.as_str());
        let utils = file.resolve_name(&self.utils);

        Ok(LookupBodies {
            get_lookups: format!("return {utils}::makeSelectOptionsFromUrl({url}, $mSelectedItem);"),
            get_visible_value: format!("return {utils}::getLookupLabelFromUrl({url}, $iItemId);"),
        })
    }
}

impl Default for DefaultLookupFactory {
    fn default() -> Self {
        Self::new(&GeneratorConfig::default())
    }
}

impl LookupStrategyFactory for DefaultLookupFactory {
    fn create(&self, column: &Column, file: &mut PhpFile) -> Result<LookupBodies, LookupError> {
        match &column.lookup {
            Some(LookupDescriptor::Model {
                full_class,
                visible_column,
            }) => self.model_lookup(column, file, full_class, visible_column),
            Some(LookupDescriptor::Url { url }) => self.url_lookup(column, file, url),
            None => Err(LookupError::MissingDescriptor {
                column: column.name.clone(),
            }),
        }
    }
}

fn incomplete(column: &Column, reason: &str) -> LookupError {
    LookupError::Incomplete {
        column: column.name.clone(),
        reason: reason.to_string(),
    }
}
