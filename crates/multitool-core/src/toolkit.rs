//! The toolkit: top-level registry of categories and the request entry point.

use crate::category::{Category, DispatchOptions};
use crate::config::ToolkitConfig;
use crate::context::CallContext;
use crate::error::{HandleError, StructuredError};
use crate::manifest;
use crate::observer::{DispatchObserver, TracingObserver};
use crate::protocol::{CategoryResponse, ToolkitRequest, ToolkitResponse};
use crate::schema::{SchemaProvider, ToolDefinition};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Registry of categories plus the dispatcher for toolkit requests.
///
/// A toolkit is assembled once through [`ToolkitBuilder`] and is read-only
/// afterwards, so it can be shared across concurrent calls without locking.
///
/// # Example
///
/// ```rust
/// use multitool_core::{CallContext, Category, Tool, Toolkit};
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct Args { val: String }
///
/// let toolkit = Toolkit::new("t", [Category::new("p1", "First", [
///     Tool::from_fn("c1a", "Echo", |_ctx, a: Args| Ok::<_, String>(a.val)),
/// ])]);
///
/// let raw = br#"{"name":"t","parents":[{"name":"p1","childs":[{"name":"c1a","args":{"val":"x"}}]}]}"#;
/// let response = tokio_test::block_on(toolkit.handle(&CallContext::new(), raw)).unwrap();
/// assert_eq!(response.categories[0].tools[0].name, "c1a");
/// ```
#[derive(Clone)]
pub struct Toolkit {
    name: String,
    categories: HashMap<String, Category>,
    config: ToolkitConfig,
    observer: Arc<dyn DispatchObserver>,
}

impl Toolkit {
    /// Build a toolkit with default configuration and the tracing observer.
    pub fn new(name: impl Into<String>, categories: impl IntoIterator<Item = Category>) -> Self {
        Self::builder(name).categories(categories).build()
    }

    pub fn builder(name: impl Into<String>) -> ToolkitBuilder {
        ToolkitBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// Registered category names, sorted.
    pub fn category_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered categories, sorted by name.
    pub fn categories(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.categories.values().collect();
        categories.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Model-facing description of every category and tool.
    pub fn manifest(&self) -> String {
        manifest::render(self)
    }

    /// Resolve a provider name, falling back to the default for unknown names.
    pub fn provider(&self, name: &str) -> SchemaProvider {
        SchemaProvider::parse(name).unwrap_or_else(|| {
            self.observer
                .unsupported_provider(name, SchemaProvider::DEFAULT.name());
            SchemaProvider::DEFAULT
        })
    }

    /// Request-tree schema for `provider`.
    pub fn export_schema(&self, provider: &str) -> Value {
        self.provider(provider).request_schema()
    }

    /// One tool registration exposing the whole toolkit to `provider`.
    pub fn tool_definition(&self, provider: &str) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.manifest(),
            input_schema: self.export_schema(provider),
        }
    }

    /// Decode and run a raw toolkit request.
    ///
    /// Per-category and per-tool failures are embedded in the returned tree.
    /// The call itself fails only when the payload cannot be decoded or names
    /// no categories; the error still carries a response tree.
    pub async fn handle(
        &self,
        ctx: &CallContext,
        raw: &[u8],
    ) -> Result<ToolkitResponse, HandleError> {
        let request = match ToolkitRequest::from_slice(raw) {
            Ok(request) => request,
            Err(err) => {
                let error = StructuredError::invalid_input_json(&err);
                self.observer.request_rejected(&self.name, &error);
                return Err(HandleError {
                    response: ToolkitResponse::parse_error(error.clone()),
                    error,
                });
            }
        };
        self.handle_request(ctx, request).await
    }

    /// Run an already decoded request.
    pub async fn handle_request(
        &self,
        ctx: &CallContext,
        request: ToolkitRequest,
    ) -> Result<ToolkitResponse, HandleError> {
        let mut response = ToolkitResponse::new(&self.name);
        if request.categories.is_empty() {
            let error = StructuredError::no_toolkit_parents();
            self.observer.request_rejected(&self.name, &error);
            return Err(HandleError { error, response });
        }

        let options = DispatchOptions {
            mode: self.config.dispatch,
            tool_timeout: self.config.tool_timeout(),
            observer: self.observer.as_ref(),
        };

        for category_request in request.categories {
            let Some(category) = self.categories.get(&category_request.name) else {
                self.observer.category_not_found(&category_request.name);
                response.push(CategoryResponse::parent_not_found(&category_request.name));
                continue;
            };
            let category_response = category
                .dispatch_with(ctx, category_request.tools, options)
                .await;
            response.push(category_response);
        }

        Ok(response)
    }
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("name", &self.name)
            .field("categories", &self.category_names())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`Toolkit`].
///
/// Duplicate category names keep the last registration; duplicates and
/// absent entries are reported to the observer when [`build`](Self::build)
/// runs, never rejected.
pub struct ToolkitBuilder {
    name: String,
    categories: Vec<Category>,
    absent: usize,
    config: ToolkitConfig,
    observer: Arc<dyn DispatchObserver>,
}

impl ToolkitBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
            absent: 0,
            config: ToolkitConfig::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories.extend(categories);
        self
    }

    /// Register a category that may be absent; absent entries are skipped.
    pub fn maybe_category(mut self, category: Option<Category>) -> Self {
        match category {
            Some(category) => self.categories.push(category),
            None => self.absent += 1,
        }
        self
    }

    pub fn config(mut self, config: ToolkitConfig) -> Self {
        self.config = config;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn build(self) -> Toolkit {
        let Self {
            name,
            categories,
            absent,
            config,
            observer,
        } = self;

        for _ in 0..absent {
            observer.absent_category_skipped(&name);
        }

        let mut registry = HashMap::with_capacity(categories.len());
        for category in categories {
            for tool in category.shadowed_tools() {
                observer.duplicate_tool(category.name(), tool);
            }
            let category_name = category.name().to_string();
            if registry.insert(category_name.clone(), category).is_some() {
                observer.duplicate_category(&category_name);
            }
        }

        Toolkit {
            name,
            categories: registry,
            config,
            observer,
        }
    }
}
