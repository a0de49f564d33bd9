//! Request and category fixtures.

use multitool_core::{Category, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

/// Request tree as a JSON value.
///
/// `categories` lists `(category, [(tool, args)])` in request order.
pub fn request_value(toolkit: &str, categories: &[(&str, &[(&str, Value)])]) -> Value {
    let parents: Vec<Value> = categories
        .iter()
        .map(|(category, tools)| {
            let childs: Vec<Value> = tools
                .iter()
                .map(|(tool, args)| json!({ "name": tool, "args": args }))
                .collect();
            json!({ "name": category, "childs": childs })
        })
        .collect();
    json!({ "name": toolkit, "parents": parents })
}

/// Request tree serialized to the bytes `Toolkit::handle` expects.
pub fn request(toolkit: &str, categories: &[(&str, &[(&str, Value)])]) -> Vec<u8> {
    request_value(toolkit, categories).to_string().into_bytes()
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ValArgs {
    pub val: String,
}

/// A category whose tools answer `{"res": "<tool>:<val>"}`.
pub fn echo_category(name: &str, tools: &[&str]) -> Category {
    let tools = tools.iter().map(|tool| {
        let label = tool.to_string();
        Tool::from_fn(*tool, format!("desc_{}", tool), move |_ctx, args: ValArgs| {
            Ok::<_, String>(json!({ "res": format!("{}:{}", label, args.val) }))
        })
    });
    Category::new(name, format!("desc_{}", name), tools)
}
