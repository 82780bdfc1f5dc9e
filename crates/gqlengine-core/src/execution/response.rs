use crate::execution::GraphQLError;
use crate::execution::RequestError;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// The outbound result of one request.
///
/// A request rejected before execution has no `data` key at all; an
/// executed request always has one (possibly `null`), alongside any field
/// errors.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,
}
impl Response {
    pub fn from_request_error(err: &RequestError, include_locations: bool) -> Self {
        Self {
            data: None,
            errors: err.to_graphql_errors(include_locations),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
