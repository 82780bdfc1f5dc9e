use serde_json::Value;

/// A resolver's output before it is completed against the field's type.
///
/// Objects carry an optional type tag naming their concrete object type.
/// The tag is required wherever the field's declared type is an interface or
/// union; converting a JSON object takes the tag from its `__typename` key.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedValue {
    Null,
    Leaf(Value),
    List(Vec<ResolvedValue>),
    Object {
        type_tag: Option<String>,
        data: Value,
    },
}
impl ResolvedValue {
    /// An untagged (or `__typename`-tagged) object.
    pub fn object(data: Value) -> Self {
        let type_tag = data.get("__typename")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self::Object { type_tag, data }
    }

    /// An object explicitly tagged with its concrete type.
    pub fn typed_object(type_name: impl Into<String>, data: Value) -> Self {
        Self::Object {
            type_tag: Some(type_name.into()),
            data,
        }
    }

    pub fn list<T: Into<ResolvedValue>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn type_tag(&self) -> Option<&str> {
        match self {
            Self::Object { type_tag, .. } => type_tag.as_deref(),
            _ => None,
        }
    }

    /// Flattens back into plain JSON, dropping type tags.
    pub fn into_json(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Leaf(value) | Self::Object { data: value, .. } => value,
            Self::List(items) => Value::Array(items.into_iter().map(Self::into_json).collect()),
        }
    }
}
impl From<Value> for ResolvedValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Array(items) => Self::list(items),
            Value::Object(_) => Self::object(value),
            leaf => Self::Leaf(leaf),
        }
    }
}
impl<T: Into<ResolvedValue>> From<Option<T>> for ResolvedValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
impl<T: Into<ResolvedValue>> From<Vec<T>> for ResolvedValue {
    fn from(value: Vec<T>) -> Self {
        Self::list(value)
    }
}

macro_rules! leaf_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ResolvedValue {
                fn from(value: $ty) -> Self {
                    Self::Leaf(Value::from(value))
                }
            }
        )*
    };
}
leaf_from!(bool, i32, i64, u32, u64, f64, String, &str);
