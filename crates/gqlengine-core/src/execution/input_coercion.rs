use crate::ast;
use crate::execution::ErrorCode;
use crate::execution::VariableCoercionError;
use crate::resolver::Arguments;
use crate::resolver::FieldError;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

/// Coerces the request's variable values against the operation's variable
/// definitions, applying declared defaults.
///
/// Variables that are neither provided nor defaulted are left out of the
/// result, so resolvers can tell "absent" from "null".
pub(crate) fn coerce_variable_values(
    schema: &Schema,
    operation: &ast::OperationDefinition,
    provided: Option<&Map<String, Value>>,
) -> Result<Map<String, Value>, Vec<VariableCoercionError>> {
    let no_variables = Map::new();
    let provided = provided.unwrap_or(&no_variables);
    let mut coerced = Map::new();
    let mut errors = vec![];

    for var_def in &operation.variable_definitions {
        let annot = TypeAnnotation::from_ast_type(&var_def.var_type);
        let invalid = |reason: String| VariableCoercionError::InvalidValue {
            variable_name: var_def.name.clone(),
            variable_type: annot.to_string(),
            reason,
            location: var_def.position,
        };

        let result = match (provided.get(&var_def.name), &var_def.default_value) {
            (Some(value), _) => coerce_json_input(schema, value, &annot).map(Some),
            (None, Some(default)) => coerce_literal(schema, default, &annot, &no_variables).map(Some),
            (None, None) if !annot.nullable() => {
                errors.push(VariableCoercionError::MissingRequired {
                    variable_name: var_def.name.clone(),
                    variable_type: annot.to_string(),
                    location: var_def.position,
                });
                continue;
            },
            (None, None) => Ok(None),
        };
        match result {
            Ok(Some(value)) => {
                coerced.insert(var_def.name.clone(), value);
            },
            Ok(None) => {},
            Err(reason) => errors.push(invalid(reason)),
        }
    }

    if errors.is_empty() {
        Ok(coerced)
    } else {
        Err(errors)
    }
}

/// Builds a field's [`Arguments`] from its literal arguments, the bound
/// variables and the parameters' defaults.
pub(crate) fn coerce_argument_values(
    schema: &Schema,
    parameters: &IndexMap<String, Parameter>,
    arguments: &[ast::Argument],
    variables: &Map<String, Value>,
) -> Result<Arguments, FieldError> {
    let mut values = IndexMap::new();
    for (name, param) in parameters {
        let annot = param.type_annotation();
        let provided = arguments.iter()
            .find(|arg| arg.name == *name)
            .map(|arg| &arg.value)
            .filter(|value| !is_unbound_variable(value, variables));

        let literal = match (provided, param.default_value()) {
            (Some(value), _) | (None, Some(value)) => value,
            (None, None) if !annot.nullable() => {
                return Err(bad_input(format!(
                    "Argument `{name}` of required type `{annot}` was not provided",
                )));
            },
            (None, None) => continue,
        };
        let value = coerce_literal(schema, literal, annot, variables)
            .map_err(|reason| bad_input(format!("Argument `{name}` has an invalid value: {reason}")))?;
        values.insert(name.clone(), value);
    }
    Ok(Arguments::new(values))
}

fn bad_input(message: String) -> FieldError {
    FieldError::new(message).with_code(ErrorCode::BadUserInput.as_str())
}

fn is_unbound_variable(value: &ast::Value, variables: &Map<String, Value>) -> bool {
    matches!(value, ast::Value::Variable(name) if !variables.contains_key(name))
}

fn null_check(annot: &TypeAnnotation) -> Result<Value, String> {
    if annot.nullable() {
        Ok(Value::Null)
    } else {
        Err(format!("expected a non-null `{annot}`, found null"))
    }
}

/// Coerces a JSON variable value to `annot`.
fn coerce_json_input(
    schema: &Schema,
    value: &Value,
    annot: &TypeAnnotation,
) -> Result<Value, String> {
    if value.is_null() {
        return null_check(annot);
    }

    match annot {
        TypeAnnotation::List(list) => match value {
            Value::Array(items) => items.iter()
                .enumerate()
                .map(|(idx, item)| {
                    coerce_json_input(schema, item, list.inner_type())
                        .map_err(|reason| format!("at index {idx}: {reason}"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            _ => Ok(Value::Array(vec![coerce_json_input(schema, value, list.inner_type())?])),
        },

        TypeAnnotation::Named(named) => {
            let named_type = schema.resolve_type(named.type_name())
                .ok_or_else(|| format!("unknown type `{}`", named.type_name()))?;
            coerce_named_json(schema, value, named_type)
        },
    }
}

fn coerce_named_json(
    schema: &Schema,
    value: &Value,
    named_type: &GraphQLType,
) -> Result<Value, String> {
    let mismatch = || format!("expected a `{}`, found `{value}`", named_type.name());

    match named_type {
        GraphQLType::Boolean => value.as_bool().map(Value::Bool).ok_or_else(mismatch),
        GraphQLType::Float => value.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(mismatch),
        GraphQLType::ID => match value {
            Value::String(s) => Ok(Value::String(s.clone())),
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(Value::String(n.to_string())),
            _ => Err(mismatch()),
        },
        GraphQLType::Int => value.as_i64()
            .filter(|i| i32::try_from(*i).is_ok())
            .map(Value::from)
            .ok_or_else(mismatch),
        GraphQLType::String => value.as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(mismatch),
        GraphQLType::Scalar(_) => Ok(value.clone()),
        GraphQLType::Enum(enum_type) => match value.as_str() {
            Some(name) if enum_type.has_value(name) => Ok(Value::from(name)),
            _ => Err(format!("`{value}` is not a value of enum `{}`", enum_type.name())),
        },
        GraphQLType::InputObject(input_type) => {
            let Value::Object(fields) = value else {
                return Err(mismatch());
            };
            coerce_input_object(
                schema,
                input_type,
                fields.keys().map(String::as_str),
                |name| fields.get(name).map(|field_value| InputSource::Json(field_value)),
                &Map::new(),
            )
        },
        GraphQLType::Interface(_) | GraphQLType::Object(_) | GraphQLType::Union(_) => {
            Err(format!("`{}` is not an input type", named_type.name()))
        },
    }
}

/// Coerces a document literal (or a default value) to `annot`, substituting
/// bound variables.
pub(crate) fn coerce_literal(
    schema: &Schema,
    value: &ast::Value,
    annot: &TypeAnnotation,
    variables: &Map<String, Value>,
) -> Result<Value, String> {
    match value {
        ast::Value::Variable(name) => {
            return match variables.get(name) {
                Some(Value::Null) | None => null_check(annot),
                Some(bound) => Ok(bound.clone()),
            };
        },
        ast::Value::Null => return null_check(annot),
        _ => {},
    }

    match annot {
        TypeAnnotation::List(list) => match value {
            ast::Value::List(items) => items.iter()
                .enumerate()
                .map(|(idx, item)| {
                    coerce_literal(schema, item, list.inner_type(), variables)
                        .map_err(|reason| format!("at index {idx}: {reason}"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            _ => Ok(Value::Array(vec![coerce_literal(schema, value, list.inner_type(), variables)?])),
        },

        TypeAnnotation::Named(named) => {
            let named_type = schema.resolve_type(named.type_name())
                .ok_or_else(|| format!("unknown type `{}`", named.type_name()))?;
            coerce_named_literal(schema, value, named_type, variables)
        },
    }
}

fn coerce_named_literal(
    schema: &Schema,
    value: &ast::Value,
    named_type: &GraphQLType,
    variables: &Map<String, Value>,
) -> Result<Value, String> {
    let mismatch = || {
        format!("expected a `{}`, found {} `{value}`", named_type.name(), value.kind_name())
    };

    match (named_type, value) {
        (GraphQLType::Boolean, ast::Value::Boolean(b)) => Ok(Value::Bool(*b)),
        (GraphQLType::Float, ast::Value::Int(i)) => Ok(Value::from(f64::from(*i))),
        (GraphQLType::Float, ast::Value::Float(f)) => Number::from_f64(*f)
            .map(Value::Number)
            .ok_or_else(mismatch),
        (GraphQLType::ID, ast::Value::Int(i)) => Ok(Value::String(i.to_string())),
        (GraphQLType::ID | GraphQLType::String, ast::Value::String(s)) => Ok(Value::String(s.clone())),
        (GraphQLType::Int, ast::Value::Int(i)) => Ok(Value::from(*i)),
        (GraphQLType::Scalar(_), _) => Ok(literal_to_json(value, variables)),
        (GraphQLType::Enum(enum_type), ast::Value::Enum(name)) if enum_type.has_value(name) => {
            Ok(Value::String(name.clone()))
        },
        (GraphQLType::InputObject(input_type), ast::Value::Object(fields)) => coerce_input_object(
            schema,
            input_type,
            fields.keys().map(String::as_str),
            |name| {
                fields.get(name)
                    .filter(|field_value| !is_unbound_variable(field_value, variables))
                    .map(InputSource::Literal)
            },
            variables,
        ),
        _ => Err(mismatch()),
    }
}

enum InputSource<'v> {
    Json(&'v Value),
    Literal(&'v ast::Value),
}

/// Shared by JSON and literal input objects: rejects unknown fields, fills
/// defaults and enforces required fields, in definition order.
fn coerce_input_object<'v>(
    schema: &Schema,
    input_type: &InputObjectType,
    mut provided_names: impl Iterator<Item = &'v str>,
    lookup: impl Fn(&str) -> Option<InputSource<'v>>,
    variables: &Map<String, Value>,
) -> Result<Value, String> {
    if let Some(unknown) = provided_names.find(|name| input_type.field(name).is_none()) {
        return Err(format!("unknown field `{unknown}` for input type `{}`", input_type.name()));
    }

    let mut out = Map::new();
    for (name, field_def) in input_type.fields() {
        let annot = field_def.type_annotation();
        let coerced = match (lookup(name), field_def.default_value()) {
            (Some(InputSource::Json(value)), _) => coerce_json_input(schema, value, annot),
            (Some(InputSource::Literal(value)), _) | (None, Some(value)) => {
                coerce_literal(schema, value, annot, variables)
            },
            (None, None) if !annot.nullable() => {
                return Err(format!(
                    "missing required field `{name}` of type `{annot}` for input type `{}`",
                    input_type.name(),
                ));
            },
            (None, None) => continue,
        };
        let value = coerced.map_err(|reason| format!("in field `{name}`: {reason}"))?;
        out.insert(name.clone(), value);
    }
    Ok(Value::Object(out))
}

/// Converts a literal to JSON without type-directed coercion, for custom
/// scalars.
fn literal_to_json(value: &ast::Value, variables: &Map<String, Value>) -> Value {
    match value {
        ast::Value::Variable(name) => variables.get(name).cloned().unwrap_or(Value::Null),
        ast::Value::Int(i) => Value::from(*i),
        ast::Value::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        ast::Value::String(s) | ast::Value::Enum(s) => Value::String(s.clone()),
        ast::Value::Boolean(b) => Value::Bool(*b),
        ast::Value::Null => Value::Null,
        ast::Value::List(items) => Value::Array(
            items.iter().map(|item| literal_to_json(item, variables)).collect(),
        ),
        ast::Value::Object(fields) => Value::Object(
            fields.iter()
                .map(|(name, item)| (name.clone(), literal_to_json(item, variables)))
                .collect(),
        ),
    }
}
