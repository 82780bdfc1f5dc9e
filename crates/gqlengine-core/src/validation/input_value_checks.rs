use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use gqlengine_parser::ast;

/// A variable referenced inside an argument or default value, with the type
/// expected at the exact position it appears.
pub(crate) struct VariableUsage<'v> {
    pub(crate) location_has_default: bool,
    pub(crate) location_type: TypeAnnotation,
    pub(crate) name: &'v str,
}

/// Checks a literal against an input type. Variables are accepted here;
/// their types are checked separately through [`collect_variable_usages`].
///
/// Returns a human-readable reason on mismatch.
pub(crate) fn check_input_value(
    schema: &Schema,
    value: &ast::Value,
    annot: &TypeAnnotation,
) -> Result<(), String> {
    match value {
        ast::Value::Variable(_) => return Ok(()),
        ast::Value::Null if annot.nullable() => return Ok(()),
        ast::Value::Null => return Err(format!("expected a non-null `{annot}`, found null")),
        _ => {},
    }

    match annot {
        TypeAnnotation::List(list) => match value {
            ast::Value::List(items) => {
                for (idx, item) in items.iter().enumerate() {
                    check_input_value(schema, item, list.inner_type())
                        .map_err(|reason| format!("at index {idx}: {reason}"))?;
                }
                Ok(())
            },
            // Input coercion wraps a single item in a list.
            _ => check_input_value(schema, value, list.inner_type()),
        },

        TypeAnnotation::Named(named) => {
            let Some(named_type) = schema.resolve_type(named.type_name()) else {
                // Undefined input types are reported where they are declared.
                return Ok(());
            };
            check_named_input_value(schema, value, named_type)
        },
    }
}

fn check_named_input_value(
    schema: &Schema,
    value: &ast::Value,
    named_type: &GraphQLType,
) -> Result<(), String> {
    let mismatch = || -> Result<(), String> {
        Err(format!(
            "expected a `{}`, found {} `{value}`",
            named_type.name(),
            value.kind_name(),
        ))
    };

    match (named_type, value) {
        (GraphQLType::Int, ast::Value::Int(_))
            | (GraphQLType::Float, ast::Value::Int(_) | ast::Value::Float(_))
            | (GraphQLType::String, ast::Value::String(_))
            | (GraphQLType::Boolean, ast::Value::Boolean(_))
            | (GraphQLType::ID, ast::Value::String(_) | ast::Value::Int(_)) => Ok(()),

        (GraphQLType::Int, _)
            | (GraphQLType::Float, _)
            | (GraphQLType::String, _)
            | (GraphQLType::Boolean, _)
            | (GraphQLType::ID, _) => mismatch(),

        // Custom scalars accept any literal.
        (GraphQLType::Scalar(_), _) => Ok(()),

        (GraphQLType::Enum(enum_type), ast::Value::Enum(name)) => {
            if enum_type.has_value(name) {
                Ok(())
            } else {
                Err(format!("`{name}` is not a value of the `{}` enum", enum_type.name()))
            }
        },
        (GraphQLType::Enum(_), _) => mismatch(),

        (GraphQLType::InputObject(input), ast::Value::Object(fields)) => {
            for (field_name, field_value) in fields {
                let Some(input_field) = input.field(field_name) else {
                    return Err(format!(
                        "`{field_name}` is not a field of the `{}` input type",
                        input.name(),
                    ));
                };
                check_input_value(schema, field_value, input_field.type_annotation())
                    .map_err(|reason| format!("in field `{field_name}`: {reason}"))?;
            }
            for input_field in input.fields().values() {
                if input_field.is_required() && !fields.contains_key(input_field.name()) {
                    return Err(format!(
                        "missing required field `{}` of the `{}` input type",
                        input_field.name(),
                        input.name(),
                    ));
                }
            }
            Ok(())
        },
        (GraphQLType::InputObject(_), _) => mismatch(),

        // Output types in input position are reported at their declaration.
        (GraphQLType::Interface(_) | GraphQLType::Object(_) | GraphQLType::Union(_), _) => Ok(()),
    }
}

/// Collects every variable referenced in `value`, paired with the type
/// expected where it appears.
pub(crate) fn collect_variable_usages<'v>(
    schema: &Schema,
    value: &'v ast::Value,
    annot: &TypeAnnotation,
    location_has_default: bool,
    usages: &mut Vec<VariableUsage<'v>>,
) {
    match value {
        ast::Value::Variable(name) => usages.push(VariableUsage {
            location_has_default,
            location_type: annot.clone(),
            name,
        }),

        ast::Value::List(items) => {
            let item_type = match annot {
                TypeAnnotation::List(list) => list.inner_type(),
                TypeAnnotation::Named(_) => annot,
            };
            for item in items {
                collect_variable_usages(schema, item, item_type, false, usages);
            }
        },

        ast::Value::Object(fields) => {
            let input = annot.as_named_annotation()
                .and_then(|named| schema.resolve_type(named.type_name()))
                .and_then(GraphQLType::as_input_object)
                .or_else(|| {
                    let item = annot.as_list_annotation()?.inner_type().as_named_annotation()?;
                    schema.resolve_type(item.type_name())?.as_input_object()
                });
            let Some(input) = input else {
                return;
            };
            for (field_name, field_value) in fields {
                if let Some(input_field) = input.field(field_name) {
                    collect_variable_usages(
                        schema,
                        field_value,
                        input_field.type_annotation(),
                        input_field.default_value().is_some(),
                        usages,
                    );
                }
            }
        },

        _ => {},
    }
}
