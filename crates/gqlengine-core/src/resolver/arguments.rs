use crate::resolver::FieldError;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A field's coerced arguments, in declaration order.
///
/// Arguments that were neither supplied nor defaulted are absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    values: IndexMap<String, Value>,
}
impl Arguments {
    pub fn new(values: IndexMap<String, Value>) -> Self {
        Self { values }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Deserializes one argument. A missing argument deserializes from
    /// `null`, so `Option<T>` targets see `None`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, FieldError> {
        let value = self.values.get(name).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|err| {
            FieldError::new(format!("invalid value for argument `{name}`: {err}"))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.values
    }
}
impl FromIterator<(String, Value)> for Arguments {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
