//! # Mock Tools for Testing
//!
//! A [`MockTool`] returns scripted results and records every argument value it
//! receives, so tests can assert on how the dispatcher drove it.

use multitool_core::{CallContext, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Accepts any JSON object as arguments.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AnyArgs(pub serde_json::Map<String, Value>);

#[derive(Debug, Clone)]
enum Scripted {
    Success(Value),
    Failure(String),
}

/// A tool whose result is scripted by the test.
#[derive(Debug, Clone)]
pub struct MockTool {
    name: String,
    description: String,
    default: Scripted,
    responses: Vec<(Value, Scripted)>,
    delay: Option<Duration>,
    call_history: Arc<Mutex<Vec<Value>>>,
}

impl MockTool {
    /// Create a mock tool that echoes its arguments back.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: format!("Mock tool {}", name),
            name,
            default: Scripted::Success(Value::Null),
            responses: Vec::new(),
            delay: None,
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Return `response` when called with exactly `args`.
    pub fn with_response(mut self, args: Value, response: Value) -> Self {
        self.responses.push((args, Scripted::Success(response)));
        self
    }

    /// Fail with `error` when called with exactly `args`.
    pub fn with_failure(mut self, args: Value, error: impl Into<String>) -> Self {
        self.responses.push((args, Scripted::Failure(error.into())));
        self
    }

    /// Set the result for unmatched arguments.
    pub fn with_default_response(mut self, response: Value) -> Self {
        self.default = Scripted::Success(response);
        self
    }

    /// Fail for unmatched arguments.
    pub fn with_default_failure(mut self, error: impl Into<String>) -> Self {
        self.default = Scripted::Failure(error.into());
        self
    }

    /// Sleep before answering. The sleep observes cancellation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Bind this mock as a [`Tool`]. Clones share call history.
    pub fn tool(&self) -> Tool {
        let mock = self.clone();
        Tool::new(
            self.name.clone(),
            self.description.clone(),
            move |ctx: CallContext, args: AnyArgs| {
                let mock = mock.clone();
                async move { mock.answer(&ctx, Value::Object(args.0)).await }
            },
        )
    }

    async fn answer(&self, ctx: &CallContext, args: Value) -> Result<Value, String> {
        self.record(args.clone());
        if let Some(delay) = self.delay {
            tokio::select! {
                _ = ctx.cancelled() => return Err(format!("{} cancelled", self.name)),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let scripted = self
            .responses
            .iter()
            .find(|(expected, _)| *expected == args)
            .map(|(_, scripted)| scripted)
            .unwrap_or(&self.default);
        match scripted {
            Scripted::Success(Value::Null) => Ok(args),
            Scripted::Success(value) => Ok(value.clone()),
            Scripted::Failure(error) => Err(error.clone()),
        }
    }

    fn record(&self, args: Value) {
        if let Ok(mut history) = self.call_history.lock() {
            history.push(args);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of times the handler ran.
    pub fn call_count(&self) -> usize {
        self.call_history.lock().map(|h| h.len()).unwrap_or_default()
    }

    /// Arguments of every call, in call order.
    pub fn call_history(&self) -> Vec<Value> {
        self.call_history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    pub fn was_called_with(&self, args: &Value) -> bool {
        self.call_history
            .lock()
            .map(|h| h.contains(args))
            .unwrap_or(false)
    }

    /// Reset call history.
    pub fn reset(&self) {
        if let Ok(mut history) = self.call_history.lock() {
            history.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multitool_core::ErrorCode;
    use serde_json::json;

    #[tokio::test]
    async fn default_mock_echoes_arguments() {
        let mock = MockTool::new("echo");
        let result = mock
            .tool()
            .invoke(&CallContext::new(), json!({"a": 1}))
            .await
            .unwrap();

        assert_eq!(result, json!({"a": 1}));
        assert_eq!(mock.call_count(), 1);
        assert!(mock.was_called_with(&json!({"a": 1})));
    }

    #[tokio::test]
    async fn scripted_results_match_on_arguments() {
        let mock = MockTool::new("m")
            .with_response(json!({"q": "hit"}), json!("found"))
            .with_failure(json!({"q": "bad"}), "boom")
            .with_default_response(json!("fallback"));
        let tool = mock.tool();
        let ctx = CallContext::new();

        assert_eq!(tool.invoke(&ctx, json!({"q": "hit"})).await.unwrap(), json!("found"));
        assert_eq!(tool.invoke(&ctx, json!({"q": "x"})).await.unwrap(), json!("fallback"));
        let err = tool.invoke(&ctx, json!({"q": "bad"})).await.unwrap_err();
        assert!(err.is(ErrorCode::HandlerExecutionError));
        assert_eq!(err.message, "boom");
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn non_object_arguments_never_reach_handler() {
        let mock = MockTool::new("m");
        let err = mock
            .tool()
            .invoke(&CallContext::new(), json!([1, 2]))
            .await
            .unwrap_err();

        assert!(err.is(ErrorCode::InvalidArguments));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn reset_clears_history() {
        let mock = MockTool::new("m");
        let _ = tokio_test::block_on(mock.tool().invoke(&CallContext::new(), json!({})));
        mock.reset();
        assert_eq!(mock.call_count(), 0);
    }
}
