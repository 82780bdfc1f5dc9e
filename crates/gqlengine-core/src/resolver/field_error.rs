use serde_json::Map;
use serde_json::Value;

/// An error raised while resolving a single field.
///
/// The executor records it at the field's response path; sibling fields
/// keep resolving. `extensions` are merged into the outbound error, and a
/// `code` extension set here takes precedence over the default
/// `RESOLVER_ERROR`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    message: String,
    extensions: Option<Map<String, Value>>,
}
impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_code(self, code: impl Into<String>) -> Self {
        self.with_extension("code", code.into())
    }

    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.get("code")?.as_str()
    }

    pub fn extensions(&self) -> Option<&Map<String, Value>> {
        self.extensions.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
impl From<String> for FieldError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}
impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
