use indexmap::IndexMap;

/// A literal or variable reference in argument/default-value position.
///
/// Lists and objects nest to any depth. Object fields keep source order.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Variable(String),
    Int(i32),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Returns `true` if this value contains no variable references.
    pub fn is_const(&self) -> bool {
        match self {
            Value::Variable(_) => false,
            Value::List(items) => items.iter().all(Value::is_const),
            Value::Object(fields) => fields.values().all(Value::is_const),
            Value::Int(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Boolean(_)
            | Value::Null
            | Value::Enum(_) => true,
        }
    }

    /// Names of all variables referenced anywhere in this value.
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Value::Variable(name) => out.push(name),
            Value::List(items) => items.iter().for_each(|item| item.collect_variables(out)),
            Value::Object(fields) => fields.values().for_each(|v| v.collect_variables(out)),
            _ => {},
        }
    }

    /// A short name for the kind of literal, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Variable(_) => "variable",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Boolean(_) => "Boolean",
            Value::Null => "null",
            Value::Enum(_) => "enum value",
            Value::List(_) => "list",
            Value::Object(_) => "input object",
        }
    }
}
