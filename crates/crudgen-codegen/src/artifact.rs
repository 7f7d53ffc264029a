//! In-memory representation of a generated PHP class file.
//!
//! Generators build a [`PhpFile`] and hand it to [`crate::render`]. Method
//! bodies are opaque text; nothing here parses or rewrites them.

/// A PHP scalar used for property defaults and parameter defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhpValue {
    Null,
    Bool(bool),
    String(String),
}

impl From<&str> for PhpValue {
    fn from(s: &str) -> Self {
        PhpValue::String(s.to_string())
    }
}

impl From<String> for PhpValue {
    fn from(s: String) -> Self {
        PhpValue::String(s)
    }
}

impl From<Option<String>> for PhpValue {
    fn from(s: Option<String>) -> Self {
        s.map_or(PhpValue::Null, PhpValue::String)
    }
}

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// Class-level modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassModifier {
    Abstract,
    Final,
}

/// A class property with its default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: PhpValue,
    pub visibility: Visibility,
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub default: Option<PhpValue>,
}

impl Parameter {
    /// A parameter without a default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// A parameter defaulting to `null`.
    pub fn nullable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(PhpValue::Null),
        }
    }
}

/// A method with an opaque body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Option<String>,
    pub visibility: Visibility,
    /// Body text, one statement per line, without surrounding braces.
    pub body: String,
}

impl Method {
    /// Creates a public method with no parameters.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: vec![],
            return_type: None,
            visibility: Visibility::Public,
            body: body.into(),
        }
    }

    /// Adds a parameter.
    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Sets the return type.
    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassDecl {
    pub name: String,
    pub modifier: Option<ClassModifier>,
    /// Fully qualified parent class.
    pub extends: Option<String>,
    /// Fully qualified interfaces, deduplicated.
    pub implements: Vec<String>,
    /// Fully qualified traits, deduplicated.
    pub traits: Vec<String>,
    /// Doc comment lines.
    pub comments: Vec<String>,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns true if a method with this name was added.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }

    /// Looks up a method by name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Looks up a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A PHP file holding one namespaced class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhpFile {
    pub namespace: String,
    /// Imported symbols in insertion order.
    pub uses: Vec<String>,
    pub class: ClassDecl,
}

impl PhpFile {
    /// Creates a file declaring `class_name` in `namespace`.
    pub fn new(namespace: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            uses: vec![],
            class: ClassDecl::new(class_name),
        }
    }

    /// Imports a symbol; repeated imports are ignored.
    pub fn add_use(&mut self, symbol: impl Into<String>) -> &mut Self {
        push_unique(&mut self.uses, normalize(symbol.into()));
        self
    }

    /// Sets the parent class and imports it.
    pub fn set_extends(&mut self, parent: impl Into<String>) -> &mut Self {
        let parent = normalize(parent.into());
        self.add_use(parent.clone());
        self.class.extends = Some(parent);
        self
    }

    /// Declares an implemented interface and imports it.
    ///
    /// Adding the same interface twice keeps a single entry.
    pub fn add_implement(&mut self, interface: impl Into<String>) -> &mut Self {
        let interface = normalize(interface.into());
        self.add_use(interface.clone());
        push_unique(&mut self.class.implements, interface);
        self
    }

    /// Composes a trait. Traits are referenced fully qualified, not imported.
    pub fn add_trait(&mut self, name: impl Into<String>) -> &mut Self {
        push_unique(&mut self.class.traits, normalize(name.into()));
        self
    }

    pub fn set_modifier(&mut self, modifier: ClassModifier) -> &mut Self {
        self.class.modifier = Some(modifier);
        self
    }

    pub fn add_comment(&mut self, line: impl Into<String>) -> &mut Self {
        self.class.comments.push(line.into());
        self
    }

    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PhpValue>,
        visibility: Visibility,
    ) -> &mut Self {
        self.class.properties.push(Property {
            name: name.into(),
            value: value.into(),
            visibility,
        });
        self
    }

    pub fn add_method(&mut self, method: Method) -> &mut Self {
        self.class.methods.push(method);
        self
    }

    /// Returns the `(symbol, alias)` pairs of the import list.
    ///
    /// A symbol whose short name clashes with the declared class or with an
    /// earlier import gets its parent segment prefixed, e.g.
    /// `Crud\Invoice\Field\Base\Amount` imported into class `Amount` becomes
    /// `BaseAmount`.
    pub fn aliases(&self) -> Vec<(&str, String)> {
        let mut taken: Vec<String> = vec![self.class.name.clone()];
        let mut result = Vec::with_capacity(self.uses.len());

        for symbol in &self.uses {
            let mut segments = symbol.rsplit('\\');
            let short = segments.next().unwrap_or(symbol.as_str()).to_string();
            let alias = if taken.contains(&short) {
                let mut alias = short.clone();
                for parent in segments {
                    alias = format!("{parent}{alias}");
                    if !taken.contains(&alias) {
                        break;
                    }
                }
                alias
            } else {
                short
            };
            taken.push(alias.clone());
            result.push((symbol.as_str(), alias));
        }

        result
    }

    /// Returns how `symbol` is spelled inside this file.
    ///
    /// Imported symbols use their alias, symbols directly inside the file's
    /// namespace use their relative name, anything else is fully qualified.
    pub fn resolve_name(&self, symbol: &str) -> String {
        let symbol = symbol.trim_start_matches('\\');
        if let Some((_, alias)) = self.aliases().into_iter().find(|(s, _)| *s == symbol) {
            return alias;
        }
        if !self.namespace.is_empty() {
            if let Some(rest) = symbol.strip_prefix(&format!("{}\\", self.namespace)) {
                if !rest.contains('\\') {
                    return rest.to_string();
                }
            }
        }
        format!("\\{symbol}")
    }
}

fn normalize(symbol: String) -> String {
    symbol.trim_start_matches('\\').to_string()
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}
