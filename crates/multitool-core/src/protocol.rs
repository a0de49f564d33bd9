//! Wire shapes for toolkit requests and responses.
//!
//! A request names categories ("parents") and, inside each, the tools
//! ("childs") to run with their raw JSON arguments. The response mirrors the
//! request tree item for item, in request order.

use crate::error::StructuredError;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Response name used when the request payload could not be decoded.
pub const PARSE_ERROR_RESPONSE_NAME: &str = "toolkit_request_parse_error";
/// Category slot name used when the request payload could not be decoded.
pub const PARSE_ERROR_CATEGORY_NAME: &str = "_parse_error";
/// Tool slot name used when the request payload could not be decoded.
pub const PARSE_ERROR_TOOL_NAME: &str = "_input_error";
/// Tool slot name used when the requested category is not registered.
pub const PARENT_ERROR_TOOL_NAME: &str = "_parent_error";

/// Top-level toolkit invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolkitRequest {
    /// The name of the toolkit.
    pub name: String,
    /// The parent toolkits to execute within the toolkit.
    #[serde(rename = "parents", default, deserialize_with = "null_as_empty")]
    pub categories: Vec<CategoryRequest>,
}

/// The tools requested from one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryRequest {
    /// The name of the parent toolkit to execute.
    pub name: String,
    /// The child tools to execute within this parent.
    #[serde(rename = "childs", default, deserialize_with = "null_as_empty")]
    pub tools: Vec<ToolRequest>,
}

/// One tool call. `args` stays opaque until the tool decodes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolRequest {
    /// The name of the child tool to execute.
    pub name: String,
    /// The arguments for the child tool, as a JSON object.
    #[serde(default)]
    pub args: Value,
}

// A missing or null list decodes as an empty one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ToolkitRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: CategoryRequest) -> Self {
        self.categories.push(category);
        self
    }

    /// Decode a request from raw JSON bytes.
    pub fn from_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }
}

impl CategoryRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tools: Vec::new(),
        }
    }

    pub fn with_tool(mut self, name: impl Into<String>, args: Value) -> Self {
        self.tools.push(ToolRequest::new(name, args));
        self
    }
}

impl ToolRequest {
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Response tree returned for a [`ToolkitRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolkitResponse {
    pub name: String,
    #[serde(
        rename = "responses",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub categories: Vec<CategoryResponse>,
}

/// Results of one requested category, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub name: String,
    #[serde(
        rename = "childsResponses",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tools: Vec<ToolResponse>,
}

/// Outcome of one requested tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub name: String,
    #[serde(rename = "response")]
    pub result: ToolOutcome,
}

/// Either the handler's serialized result or the error recorded in its place.
///
/// Serialized without a tag: a failure is the bare `{"Code", "Message"}` object.
/// When reading a response back, only an object with exactly those two string
/// keys is taken as a failure; anything else is a success value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutcome {
    Failure(StructuredError),
    Success(Value),
}

impl<'de> Deserialize<'de> for ToolOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let is_failure = value.as_object().is_some_and(|fields| {
            fields.len() == 2
                && fields.get("Code").is_some_and(Value::is_string)
                && fields.get("Message").is_some_and(Value::is_string)
        });
        if is_failure {
            serde_json::from_value(value)
                .map(ToolOutcome::Failure)
                .map_err(serde::de::Error::custom)
        } else {
            Ok(ToolOutcome::Success(value))
        }
    }
}

impl ToolkitResponse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
        }
    }

    /// Degenerate response for a payload that could not be decoded.
    pub fn parse_error(error: StructuredError) -> Self {
        let mut category = CategoryResponse::new(PARSE_ERROR_CATEGORY_NAME);
        category.push(ToolResponse::failure(PARSE_ERROR_TOOL_NAME, error));
        let mut response = Self::new(PARSE_ERROR_RESPONSE_NAME);
        response.push(category);
        response
    }

    pub fn push(&mut self, category: CategoryResponse) {
        self.categories.push(category);
    }

    /// First category entry with the given name.
    pub fn category(&self, name: &str) -> Option<&CategoryResponse> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// All embedded failures, in tree order.
    pub fn failures(&self) -> impl Iterator<Item = &StructuredError> {
        self.categories
            .iter()
            .flat_map(|c| c.tools.iter())
            .filter_map(|t| t.result.as_failure())
    }
}

impl CategoryResponse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tools: Vec::new(),
        }
    }

    /// Entry for an unregistered category: a single `_parent_error` slot.
    pub fn parent_not_found(name: &str) -> Self {
        let mut response = Self::new(name);
        response.push(ToolResponse::failure(
            PARENT_ERROR_TOOL_NAME,
            StructuredError::parent_not_found(name),
        ));
        response
    }

    pub fn push(&mut self, tool: ToolResponse) {
        self.tools.push(tool);
    }

    pub fn tool(&self, name: &str) -> Option<&ToolResponse> {
        self.tools.iter().find(|t| t.name == name)
    }
}

impl ToolResponse {
    pub fn success(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            result: ToolOutcome::Success(value),
        }
    }

    pub fn failure(name: impl Into<String>, error: StructuredError) -> Self {
        Self {
            name: name.into(),
            result: ToolOutcome::Failure(error),
        }
    }

    pub fn from_result(name: impl Into<String>, result: Result<Value, StructuredError>) -> Self {
        match result {
            Ok(value) => Self::success(name, value),
            Err(error) => Self::failure(name, error),
        }
    }
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success(_))
    }

    pub fn as_success(&self) -> Option<&Value> {
        match self {
            ToolOutcome::Success(value) => Some(value),
            ToolOutcome::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&StructuredError> {
        match self {
            ToolOutcome::Success(_) => None,
            ToolOutcome::Failure(error) => Some(error),
        }
    }
}
