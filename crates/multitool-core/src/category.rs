//! Categories: named groups of tools and their per-call dispatch.

use crate::config::DispatchMode;
use crate::context::CallContext;
use crate::error::StructuredError;
use crate::observer::{DispatchObserver, NoopObserver};
use crate::protocol::{CategoryResponse, ToolRequest, ToolResponse};
use crate::tool::Tool;
use futures::future::join_all;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Settings threaded from the toolkit into category dispatch.
#[derive(Clone, Copy)]
pub struct DispatchOptions<'a> {
    pub mode: DispatchMode,
    pub tool_timeout: Option<Duration>,
    pub observer: &'a dyn DispatchObserver,
}

impl Default for DispatchOptions<'_> {
    fn default() -> Self {
        Self {
            mode: DispatchMode::Sequential,
            tool_timeout: None,
            observer: &NoopObserver,
        }
    }
}

/// A named, described collection of tools.
///
/// Tool names are unique within a category; registering a name twice keeps
/// the last tool and records the name in [`shadowed_tools`](Self::shadowed_tools).
///
/// # Example
///
/// ```rust
/// use multitool_core::{Category, Tool};
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct Args { val: String }
///
/// let category = Category::new("text", "Text helpers", [
///     Tool::from_fn("upper", "Uppercase", |_ctx, a: Args| Ok::<_, String>(a.val.to_uppercase())),
///     Tool::from_fn("lower", "Lowercase", |_ctx, a: Args| Ok::<_, String>(a.val.to_lowercase())),
/// ]);
///
/// assert_eq!(category.tool_names(), vec!["lower", "upper"]);
/// ```
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    description: String,
    tools: HashMap<String, Tool>,
    shadowed: Vec<String>,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        tools: impl IntoIterator<Item = Tool>,
    ) -> Self {
        tools.into_iter().fold(
            Self {
                name: name.into(),
                description: description.into(),
                tools: HashMap::new(),
                shadowed: Vec::new(),
            },
            Self::with_tool,
        )
    }

    /// Add a tool using the builder pattern.
    pub fn with_tool(mut self, tool: Tool) -> Self {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            self.shadowed.push(name);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tool(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Registered tool names, sorted.
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered tools, sorted by name.
    pub fn tools(&self) -> Vec<&Tool> {
        let mut tools: Vec<&Tool> = self.tools.values().collect();
        tools.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        tools
    }

    /// Names that were registered more than once, in registration order.
    pub fn shadowed_tools(&self) -> &[String] {
        &self.shadowed
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the requested tools one after another.
    pub async fn dispatch(&self, ctx: &CallContext, requests: Vec<ToolRequest>) -> CategoryResponse {
        self.dispatch_with(ctx, requests, DispatchOptions::default())
            .await
    }

    /// Run the requested tools with explicit dispatch settings.
    ///
    /// Every request yields exactly one entry, in request order, whatever
    /// happens to its siblings.
    pub async fn dispatch_with(
        &self,
        ctx: &CallContext,
        requests: Vec<ToolRequest>,
        options: DispatchOptions<'_>,
    ) -> CategoryResponse {
        let mut response = CategoryResponse::new(&self.name);
        match options.mode {
            DispatchMode::Sequential => {
                for request in requests {
                    response.push(self.run_one(ctx, request, options).await);
                }
            }
            DispatchMode::Concurrent => {
                let calls = requests
                    .into_iter()
                    .map(|request| self.run_one(ctx, request, options));
                response.tools = join_all(calls).await;
            }
        }
        response
    }

    async fn run_one(
        &self,
        ctx: &CallContext,
        request: ToolRequest,
        options: DispatchOptions<'_>,
    ) -> ToolResponse {
        let ToolRequest { name, args } = request;
        let Some(tool) = self.tools.get(&name) else {
            options.observer.tool_not_found(&self.name, &name);
            let error = StructuredError::child_not_found(&self.name, &name);
            return ToolResponse::failure(name, error);
        };

        let started = Instant::now();
        let result = tool
            .invoke_with_timeout(ctx, args, options.tool_timeout)
            .await;
        match &result {
            Ok(_) => options
                .observer
                .tool_completed(&self.name, &name, started.elapsed()),
            Err(error) => options.observer.tool_failed(&self.name, &name, error),
        }
        ToolResponse::from_result(name, result)
    }
}
