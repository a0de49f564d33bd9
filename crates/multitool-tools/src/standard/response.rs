//! # Response Tools
//!
//! Surface the model's reasoning and final answer to the user. Both tools log
//! through `tracing` and acknowledge with `{"Success": true}`.

use async_trait::async_trait;
use multitool_core::{CallContext, Tool, TypedTool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ModelThinkingArgs {
    /// The model's reasoning to show to the user.
    pub thinking: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ModelResponseArgs {
    /// The model's answer to show to the user.
    pub response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Acknowledgement {
    #[serde(rename = "Success")]
    pub success: bool,
}

impl Acknowledgement {
    const OK: Self = Self { success: true };
}

#[derive(Debug, Default)]
pub struct ModelThinkingTool;

#[async_trait]
impl TypedTool for ModelThinkingTool {
    type Args = ModelThinkingArgs;
    type Output = Acknowledgement;
    type Error = Infallible;

    fn name(&self) -> &str {
        "model_thinking"
    }

    fn description(&self) -> &str {
        "Log the model's thinking to the user."
    }

    async fn call(&self, _ctx: &CallContext, args: ModelThinkingArgs) -> Result<Acknowledgement, Infallible> {
        tracing::info!(target: "multitool::model", thinking = %args.thinking, "model thinking");
        Ok(Acknowledgement::OK)
    }
}

#[derive(Debug, Default)]
pub struct ModelResponseTool;

#[async_trait]
impl TypedTool for ModelResponseTool {
    type Args = ModelResponseArgs;
    type Output = Acknowledgement;
    type Error = Infallible;

    fn name(&self) -> &str {
        "model_response"
    }

    fn description(&self) -> &str {
        "Log the model's response to the user."
    }

    async fn call(&self, _ctx: &CallContext, args: ModelResponseArgs) -> Result<Acknowledgement, Infallible> {
        tracing::info!(target: "multitool::model", response = %args.response, "model response");
        Ok(Acknowledgement::OK)
    }
}

/// Tools of the `response` category.
pub fn response_tools() -> Vec<Tool> {
    vec![
        Tool::from_typed(ModelThinkingTool),
        Tool::from_typed(ModelResponseTool),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use multitool_core::ErrorCode;
    use serde_json::json;

    #[tokio::test]
    async fn thinking_acknowledges() {
        let tool = Tool::from_typed(ModelThinkingTool);
        let result = tool
            .invoke(&CallContext::new(), json!({"thinking": "step one"}))
            .await
            .unwrap();

        assert_eq!(result, json!({"Success": true}));
    }

    #[tokio::test]
    async fn response_requires_text() {
        let tool = Tool::from_typed(ModelResponseTool);
        let err = tool
            .invoke(&CallContext::new(), json!({"thinking": "wrong field"}))
            .await
            .unwrap_err();

        assert!(err.is(ErrorCode::InvalidArguments));
    }
}
