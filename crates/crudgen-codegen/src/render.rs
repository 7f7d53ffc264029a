//! Serializes a [`PhpFile`] to PHP source text.
//!
//! Output is deterministic: the same representation always renders to the
//! same bytes, which keeps regenerated base classes byte-identical.

use crate::artifact::{ClassModifier, Method, PhpFile, PhpValue};

const INDENT: &str = "\t";

/// Renders a complete file, including the `<?php` opening tag.
pub fn render(file: &PhpFile) -> String {
    let mut out = String::from("<?php\n");

    if !file.namespace.is_empty() {
        out.push_str(&format!("namespace {};\n\n", file.namespace));
    }

    let aliases = file.aliases();
    if !aliases.is_empty() {
        for (symbol, alias) in &aliases {
            if symbol.rsplit('\\').next() == Some(alias.as_str()) {
                out.push_str(&format!("use {symbol};\n"));
            } else {
                out.push_str(&format!("use {symbol} as {alias};\n"));
            }
        }
        out.push('\n');
    }

    out.push_str(&render_class(file));
    out
}

fn render_class(file: &PhpFile) -> String {
    let class = &file.class;
    let mut out = String::new();

    if !class.comments.is_empty() {
        out.push_str("/**\n");
        for line in &class.comments {
            if line.is_empty() {
                out.push_str(" *\n");
            } else {
                out.push_str(&format!(" * {line}\n"));
            }
        }
        out.push_str(" */\n");
    }

    match class.modifier {
        Some(ClassModifier::Abstract) => out.push_str("abstract "),
        Some(ClassModifier::Final) => out.push_str("final "),
        None => {}
    }
    out.push_str(&format!("class {}", class.name));

    if let Some(parent) = &class.extends {
        out.push_str(&format!(" extends {}", file.resolve_name(parent)));
    }
    if !class.implements.is_empty() {
        let names: Vec<String> = class
            .implements
            .iter()
            .map(|i| file.resolve_name(i))
            .collect();
        out.push_str(&format!(" implements {}", names.join(", ")));
    }
    out.push_str("\n{\n");

    let mut sections: Vec<String> = Vec::new();

    if !class.traits.is_empty() {
        let traits: Vec<String> = class
            .traits
            .iter()
            .map(|t| format!("{INDENT}use {};\n", file.resolve_name(t)))
            .collect();
        sections.push(traits.concat());
    }

    if !class.properties.is_empty() {
        let props: Vec<String> = class
            .properties
            .iter()
            .map(|p| {
                format!(
                    "{INDENT}{} ${} = {};\n",
                    p.visibility.as_str(),
                    p.name,
                    render_value(&p.value)
                )
            })
            .collect();
        sections.push(props.concat());
    }

    for method in &class.methods {
        sections.push(render_method(method));
    }

    out.push_str(&sections.join("\n"));
    out.push_str("}\n");
    out
}

fn render_method(method: &Method) -> String {
    let params: Vec<String> = method
        .params
        .iter()
        .map(|p| match &p.default {
            Some(value) => format!("${} = {}", p.name, render_value(value)),
            None => format!("${}", p.name),
        })
        .collect();

    let mut out = format!(
        "{INDENT}{} function {}({})",
        method.visibility.as_str(),
        method.name,
        params.join(", ")
    );
    if let Some(ty) = &method.return_type {
        out.push_str(&format!(": {ty}"));
    }
    out.push_str(&format!("\n{INDENT}{{\n"));

    for line in method.body.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("{INDENT}{INDENT}{line}\n"));
        }
    }

    out.push_str(&format!("{INDENT}}}\n"));
    out
}

/// Renders a scalar as a PHP literal.
pub fn render_value(value: &PhpValue) -> String {
    match value {
        PhpValue::Null => "null".to_string(),
        PhpValue::Bool(true) => "true".to_string(),
        PhpValue::Bool(false) => "false".to_string(),
        PhpValue::String(s) => php_string(s),
    }
}

/// Quotes `s` as a single-quoted PHP string literal.
pub fn php_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Escapes `s` for use inside a double-quoted PHP string literal.
pub fn php_double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}
