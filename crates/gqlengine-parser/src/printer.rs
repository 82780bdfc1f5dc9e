//! Prints executable documents back to canonical GraphQL text.
//!
//! Output uses two-space indentation, one selection per line, and `, `
//! between arguments. Parsing printed output yields a document that prints
//! identically.

use crate::ast;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Prints a whole document, separating definitions with a blank line.
pub fn print_document(document: &ast::Document) -> String {
    let mut out = String::new();
    for (i, definition) in document.definitions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match definition {
            ast::Definition::Operation(op) => print_operation(&mut out, op),
            ast::Definition::Fragment(frag) => print_fragment(&mut out, frag),
        }
        out.push('\n');
    }
    out
}

fn print_operation(out: &mut String, op: &ast::OperationDefinition) {
    let shorthand = op.kind == ast::OperationKind::Query
        && op.name.is_none()
        && op.variable_definitions.is_empty()
        && op.directives.is_empty();

    if !shorthand {
        out.push_str(op.kind.as_str());
        if let Some(name) = &op.name {
            out.push(' ');
            out.push_str(name);
        }
        if !op.variable_definitions.is_empty() {
            out.push('(');
            for (i, var) in op.variable_definitions.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "${}: {}", var.name, var.var_type);
                if let Some(default) = &var.default_value {
                    out.push_str(" = ");
                    print_value(out, default);
                }
                print_directives(out, &var.directives);
            }
            out.push(')');
        }
        print_directives(out, &op.directives);
        out.push(' ');
    }
    print_selection_set(out, &op.selection_set, 0);
}

fn print_fragment(out: &mut String, frag: &ast::FragmentDefinition) {
    let _ = write!(out, "fragment {} on {}", frag.name, frag.type_condition);
    print_directives(out, &frag.directives);
    out.push(' ');
    print_selection_set(out, &frag.selection_set, 0);
}

fn print_selection_set(out: &mut String, set: &ast::SelectionSet, depth: usize) {
    out.push_str("{\n");
    for selection in &set.items {
        push_indent(out, depth + 1);
        match selection {
            ast::Selection::Field(field) => print_field(out, field, depth + 1),
            ast::Selection::FragmentSpread(spread) => {
                let _ = write!(out, "...{}", spread.fragment_name);
                print_directives(out, &spread.directives);
            },
            ast::Selection::InlineFragment(inline) => {
                out.push_str("...");
                if let Some(type_condition) = &inline.type_condition {
                    let _ = write!(out, " on {type_condition}");
                }
                print_directives(out, &inline.directives);
                out.push(' ');
                print_selection_set(out, &inline.selection_set, depth + 1);
            },
        }
        out.push('\n');
    }
    push_indent(out, depth);
    out.push('}');
}

fn print_field(out: &mut String, field: &ast::Field, depth: usize) {
    if let Some(alias) = &field.alias {
        let _ = write!(out, "{alias}: ");
    }
    out.push_str(&field.name);
    print_arguments(out, &field.arguments);
    print_directives(out, &field.directives);
    if let Some(set) = &field.selection_set {
        out.push(' ');
        print_selection_set(out, set, depth);
    }
}

fn print_arguments(out: &mut String, arguments: &[ast::Argument]) {
    if arguments.is_empty() {
        return;
    }
    out.push('(');
    for (i, arg) in arguments.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}: ", arg.name);
        print_value(out, &arg.value);
    }
    out.push(')');
}

fn print_directives(out: &mut String, directives: &[ast::Directive]) {
    for directive in directives {
        let _ = write!(out, " @{}", directive.name);
        print_arguments(out, &directive.arguments);
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Prints a value literal in canonical form.
pub fn print_value(out: &mut String, value: &ast::Value) {
    match value {
        ast::Value::Variable(name) => {
            let _ = write!(out, "${name}");
        },
        ast::Value::Int(i) => {
            let _ = write!(out, "{i}");
        },
        ast::Value::Float(f) => out.push_str(&format_float(*f)),
        ast::Value::String(s) => print_string(out, s),
        ast::Value::Boolean(b) => {
            let _ = write!(out, "{b}");
        },
        ast::Value::Null => out.push_str("null"),
        ast::Value::Enum(name) => out.push_str(name),
        ast::Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                print_value(out, item);
            }
            out.push(']');
        },
        ast::Value::Object(fields) => {
            out.push('{');
            for (i, (name, item)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{name}: ");
                print_value(out, item);
            }
            out.push('}');
        },
    }
}

/// Formats a float so it re-lexes as a FloatValue.
///
/// Rust's `Display` drops the fractional part of whole numbers (`1.0`
/// prints as `1`), which would re-lex as an Int.
fn format_float(f: f64) -> String {
    let mut text = format!("{f:?}");
    if !text.contains(['.', 'e', 'E']) && !text.contains("inf") && !text.contains("NaN") {
        text.push_str(".0");
    }
    text
}

fn print_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            },
            c => out.push(c),
        }
    }
    out.push('"');
}

impl std::fmt::Display for ast::Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_document(self))
    }
}

impl std::fmt::Display for ast::Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        print_value(&mut out, self);
        f.write_str(&out)
    }
}
