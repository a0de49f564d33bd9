//! Argument schema generation and provider-facing schema export.
//!
//! Argument schemas are derived from the handler's argument type with
//! `schemars` exactly once, when the tool is constructed. Doc comments on
//! fields become property descriptions; fields that are neither `Option` nor
//! `#[serde(default)]` are required.

use crate::protocol::ToolkitRequest;
use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Generate a self-contained JSON schema document for `T`.
///
/// Subschemas are inlined so the document never needs `$ref` resolution.
pub fn json_schema_value<T: JsonSchema>() -> Value {
    let generator = SchemaSettings::draft2020_12()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let schema = generator.into_root_schema_for::<T>();
    serde_json::to_value(&schema).unwrap_or_else(|err| {
        tracing::warn!(
            type_name = std::any::type_name::<T>(),
            error = %err,
            "failed to serialize generated schema"
        );
        Value::Null
    })
}

/// Cached schema document describing a tool's arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentSchema(Value);

impl ArgumentSchema {
    /// Derive the schema for an argument type.
    pub fn for_type<T: JsonSchema>() -> Self {
        Self(json_schema_value::<T>())
    }

    /// Wrap an externally produced schema document.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Declared property names.
    pub fn property_names(&self) -> Vec<&str> {
        self.0
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Names listed in the schema's `required` set, sorted.
    pub fn required_fields(&self) -> Vec<&str> {
        let mut required: Vec<&str> = self
            .0
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        required.sort_unstable();
        required
    }

    pub fn property_description(&self, property: &str) -> Option<&str> {
        self.0
            .get("properties")?
            .get(property)?
            .get("description")?
            .as_str()
    }

    /// Single-line JSON rendering used when inlining into the manifest.
    pub fn to_compact_string(&self) -> String {
        self.0.to_string()
    }
}

/// Model providers with a known request-schema flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaProvider {
    Anthropic,
}

impl SchemaProvider {
    /// Provider used when a requested one is not supported.
    pub const DEFAULT: SchemaProvider = SchemaProvider::Anthropic;

    pub fn name(&self) -> &'static str {
        match self {
            SchemaProvider::Anthropic => "anthropic",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Some(SchemaProvider::Anthropic),
            _ => None,
        }
    }

    pub fn all() -> &'static [SchemaProvider] {
        &[SchemaProvider::Anthropic]
    }

    /// Schema of the toolkit request tree in this provider's flavour.
    pub fn request_schema(&self) -> Value {
        match self {
            SchemaProvider::Anthropic => json_schema_value::<ToolkitRequest>(),
        }
    }
}

impl fmt::Display for SchemaProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The single tool registration a model needs to call a whole toolkit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    struct Inner {
        depth: u32,
    }

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    struct SearchArgs {
        /// The search query string.
        query: String,
        /// Maximum number of results.
        limit: Option<u32>,
        #[serde(default)]
        safe: bool,
        nested: Inner,
    }

    #[test]
    fn schema_lists_every_field() {
        let schema = ArgumentSchema::for_type::<SearchArgs>();
        let mut names = schema.property_names();
        names.sort_unstable();

        assert_eq!(names, vec!["limit", "nested", "query", "safe"]);
        assert_eq!(schema.as_value()["type"], "object");
    }

    #[test]
    fn required_set_follows_field_annotations() {
        let schema = ArgumentSchema::for_type::<SearchArgs>();
        assert_eq!(schema.required_fields(), vec!["nested", "query"]);
    }

    #[test]
    fn doc_comments_become_descriptions() {
        let schema = ArgumentSchema::for_type::<SearchArgs>();
        assert_eq!(
            schema.property_description("query"),
            Some("The search query string.")
        );
        assert_eq!(schema.property_description("safe"), None);
    }

    #[test]
    fn nested_types_are_inlined() {
        let schema = ArgumentSchema::for_type::<SearchArgs>();
        let compact = schema.to_compact_string();

        assert!(!compact.contains("$ref"));
        assert!(!compact.contains('\n'));
        assert_eq!(schema.as_value()["properties"]["nested"]["type"], "object");
    }

    #[test]
    fn provider_names_parse_case_insensitively() {
        assert_eq!(
            SchemaProvider::parse("Anthropic"),
            Some(SchemaProvider::Anthropic)
        );
        assert_eq!(SchemaProvider::parse("openai"), None);
    }

    #[test]
    fn anthropic_request_schema_describes_the_request_tree() {
        let schema = ArgumentSchema::from_value(SchemaProvider::Anthropic.request_schema());

        assert_eq!(schema.as_value()["type"], "object");
        assert_eq!(schema.required_fields(), vec!["name", "parents"]);
    }
}
