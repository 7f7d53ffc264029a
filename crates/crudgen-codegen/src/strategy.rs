//! Maps a column's form type to the generic field strategy it extends.

use crudgen_schema::{Column, FormType, FormTypeError};

/// Generic field implementations shipped by the target framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Boolean,
    Lookup,
    ForeignKey,
    Bsn,
    Money,
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
    Checkbox,
    Edit,
    Delete,
    OpenInApi,
}

/// Strategy used when a column's form type is missing or unknown.
///
/// Generation keeps going with a plain string field so one bad column does
/// not block the rest of the table; the problem is reported as a warning.
pub const FALLBACK_STRATEGY: Strategy = Strategy::String;

impl Strategy {
    /// Returns the unqualified class name of the strategy.
    pub fn class_name(&self) -> &'static str {
        match self {
            Strategy::Boolean => "GenericBoolean",
            Strategy::Lookup => "GenericLookup",
            Strategy::ForeignKey => "GenericForeignKey",
            Strategy::Bsn => "GenericBsn",
            Strategy::Money => "GenericMoney",
            Strategy::Integer => "GenericInteger",
            Strategy::Email => "GenericEmail",
            Strategy::Float => "GenericFloat",
            Strategy::Color => "GenericColor",
            Strategy::File => "GenericFile",
            Strategy::Image => "GenericImage",
            Strategy::Icon => "GenericIcon",
            Strategy::String => "GenericString",
            Strategy::Date => "GenericDate",
            Strategy::DateTime => "GenericDateTime",
            Strategy::Postcode => "GenericPostcode",
            Strategy::Textarea => "GenericTextarea",
            Strategy::Url => "GenericUrl",
            Strategy::Password => "GenericPassword",
            Strategy::Checkbox => "GenericCheckbox",
            Strategy::Edit => "GenericEdit",
            Strategy::Delete => "GenericDelete",
            Strategy::OpenInApi => "GenericOpenInApi",
        }
    }

    /// Returns the fully qualified class inside `namespace`.
    pub fn qualified(&self, namespace: &str) -> String {
        format!("{}\\{}", namespace.trim_matches('\\'), self.class_name())
    }
}

impl From<FormType> for Strategy {
    fn from(form: FormType) -> Self {
        match form {
            FormType::Boolean | FormType::Checkbox => Strategy::Boolean,
            FormType::Lookup => Strategy::Lookup,
            FormType::ForeignKey => Strategy::ForeignKey,
            FormType::Bsn => Strategy::Bsn,
            FormType::Money => Strategy::Money,
            FormType::Integer => Strategy::Integer,
            FormType::Email => Strategy::Email,
            FormType::Float => Strategy::Float,
            FormType::Color => Strategy::Color,
            FormType::File => Strategy::File,
            FormType::Image => Strategy::Image,
            FormType::Icon => Strategy::Icon,
            FormType::String => Strategy::String,
            FormType::Date => Strategy::Date,
            FormType::DateTime => Strategy::DateTime,
            FormType::Postcode => Strategy::Postcode,
            FormType::Textarea => Strategy::Textarea,
            FormType::Url => Strategy::Url,
            FormType::Password => Strategy::Password,
        }
    }
}

/// Resolves the strategy for a column.
pub fn resolve(column: &Column) -> Result<Strategy, FormTypeError> {
    column.form_type().map(Strategy::from)
}

/// Resolves the strategy for a column, falling back to [`FALLBACK_STRATEGY`].
///
/// The configuration error, if any, is handed back so the caller can report it.
pub fn resolve_or_fallback(column: &Column) -> (Strategy, Option<FormTypeError>) {
    match resolve(column) {
        Ok(strategy) => (strategy, None),
        Err(err) => (FALLBACK_STRATEGY, Some(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_form_type_resolves() {
        for form in FormType::ALL {
            let column = Column::new("x", form.as_str());
            assert!(resolve(&column).is_ok(), "{form} should resolve");
        }
    }

    #[test]
    fn test_checkbox_form_maps_to_boolean() {
        let column = Column::new("active", "CHECKBOX");
        assert_eq!(resolve(&column), Ok(Strategy::Boolean));
    }

    #[test]
    fn test_lookup_strategy() {
        let column = Column::new("country_id", "LOOKUP");
        let (strategy, err) = resolve_or_fallback(&column);
        assert_eq!(strategy, Strategy::Lookup);
        assert!(err.is_none());
        assert_eq!(
            strategy.qualified("Crud\\Generic\\Field"),
            "Crud\\Generic\\Field\\GenericLookup"
        );
    }

    #[test]
    fn test_unknown_form_falls_back_to_string() {
        let column = Column::new("gadget", "WIDGET");
        let (strategy, err) = resolve_or_fallback(&column);
        assert_eq!(strategy, Strategy::String);

        let message = err.unwrap().to_string();
        assert!(message.contains("WIDGET"));
        assert!(message.contains("gadget"));
    }

    #[test]
    fn test_missing_form_falls_back_to_string() {
        let column = Column {
            form: None,
            ..Column::new("note", "STRING")
        };
        let (strategy, err) = resolve_or_fallback(&column);
        assert_eq!(strategy, Strategy::String);
        assert_eq!(
            err,
            Some(FormTypeError::Missing {
                column: "note".to_string()
            })
        );
    }
}
