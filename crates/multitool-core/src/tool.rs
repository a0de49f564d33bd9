//! Tool binding.
//!
//! A [`Tool`] pairs a name, a description and a cached argument schema with a
//! handler. Handlers are written against a concrete argument type; the
//! constructors close over that type and erase it behind a single
//! `Value -> Value` routine, so every tool in a registry has the same shape
//! while decoding stays monomorphized.

use crate::context::CallContext;
use crate::error::StructuredError;
use crate::schema::ArgumentSchema;
use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

type BoundHandler =
    Arc<dyn Fn(CallContext, Value) -> BoxFuture<'static, Result<Value, StructuredError>> + Send + Sync>;

/// A tool implemented as a type rather than a closure.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use multitool_core::{CallContext, Tool, TypedTool};
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct EchoArgs {
///     /// Text to echo back.
///     text: String,
/// }
///
/// struct Echo;
///
/// #[async_trait]
/// impl TypedTool for Echo {
///     type Args = EchoArgs;
///     type Output = String;
///     type Error = std::convert::Infallible;
///
///     fn name(&self) -> &str { "echo" }
///     fn description(&self) -> &str { "Echoes its input." }
///
///     async fn call(&self, _ctx: &CallContext, args: EchoArgs) -> Result<String, Self::Error> {
///         Ok(args.text)
///     }
/// }
///
/// let tool = Tool::from_typed(Echo);
/// assert_eq!(tool.schema().required_fields(), vec!["text"]);
/// ```
#[async_trait]
pub trait TypedTool: Send + Sync + 'static {
    type Args: DeserializeOwned + JsonSchema + Send + 'static;
    type Output: Serialize + Send;
    type Error: fmt::Display + Send;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    async fn call(&self, ctx: &CallContext, args: Self::Args) -> Result<Self::Output, Self::Error>;
}

/// A named, described, schema-carrying dispatch target.
#[derive(Clone)]
pub struct Tool {
    name: String,
    description: String,
    schema: ArgumentSchema,
    handler: BoundHandler,
}

impl Tool {
    /// Bind an async handler.
    ///
    /// The argument schema is generated from `A` here, once.
    pub fn new<A, R, E, F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        R: Serialize,
        E: fmt::Display,
        F: Fn(CallContext, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
    {
        let name = name.into();
        let tool_name = name.clone();
        let bound: BoundHandler = Arc::new(move |ctx: CallContext, raw: Value| {
            match decode::<A>(&tool_name, raw) {
                Ok(args) => {
                    let call = handler(ctx, args);
                    async move { encode(call.await) }.boxed()
                }
                Err(err) => future::ready(Err(err)).boxed(),
            }
        });
        Self::bind::<A>(name, description.into(), bound)
    }

    /// Bind a blocking handler.
    ///
    /// The handler runs on the blocking thread pool when the call is awaited,
    /// so deadlines and cancellation answer without waiting for it.
    pub fn from_fn<A, R, E, F>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        R: Serialize,
        E: fmt::Display,
        F: Fn(&CallContext, A) -> Result<R, E> + Send + Sync + 'static,
    {
        let name = name.into();
        let tool_name = name.clone();
        let handler = Arc::new(handler);
        let bound: BoundHandler = Arc::new(move |ctx: CallContext, raw: Value| {
            match decode::<A>(&tool_name, raw) {
                Ok(args) => {
                    let handler = Arc::clone(&handler);
                    async move {
                        tokio::task::spawn_blocking(move || encode(handler(&ctx, args)))
                            .await
                            .unwrap_or_else(|err| {
                                Err(StructuredError::handler_execution(format!(
                                    "blocking handler failed: {}",
                                    err
                                )))
                            })
                    }
                    .boxed()
                }
                Err(err) => future::ready(Err(err)).boxed(),
            }
        });
        Self::bind::<A>(name, description.into(), bound)
    }

    /// Bind a [`TypedTool`] implementation.
    pub fn from_typed<T: TypedTool>(tool: T) -> Self {
        let name = tool.name().to_string();
        let description = tool.description().to_string();
        let tool = Arc::new(tool);
        let tool_name = name.clone();
        let bound: BoundHandler = Arc::new(move |ctx: CallContext, raw: Value| {
            match decode::<T::Args>(&tool_name, raw) {
                Ok(args) => {
                    let tool = Arc::clone(&tool);
                    async move { encode(tool.call(&ctx, args).await) }.boxed()
                }
                Err(err) => future::ready(Err(err)).boxed(),
            }
        });
        Self::bind::<T::Args>(name, description, bound)
    }

    fn bind<A: JsonSchema>(name: String, description: String, handler: BoundHandler) -> Self {
        Self {
            name,
            description,
            schema: ArgumentSchema::for_type::<A>(),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The schema generated at construction.
    pub fn schema(&self) -> &ArgumentSchema {
        &self.schema
    }

    /// Decode `args`, run the handler and return its serialized result.
    ///
    /// Decode failures yield `invalid_arguments` without running the handler;
    /// handler failures yield `handler_execution_error` with the handler's
    /// message. Cancellation of `ctx` yields `cancelled`.
    pub async fn invoke(&self, ctx: &CallContext, args: Value) -> Result<Value, StructuredError> {
        self.invoke_with_timeout(ctx, args, None).await
    }

    /// Like [`invoke`](Self::invoke), bounded by an optional deadline.
    pub async fn invoke_with_timeout(
        &self,
        ctx: &CallContext,
        args: Value,
        timeout: Option<Duration>,
    ) -> Result<Value, StructuredError> {
        if ctx.is_cancelled() {
            return Err(StructuredError::cancelled(&self.name));
        }

        let call = (self.handler)(ctx.clone(), args);
        let bounded = async {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                    Err(StructuredError::handler_timeout(
                        &self.name,
                        u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                    ))
                }),
                None => call.await,
            }
        };

        tokio::select! {
            biased;
            _ = ctx.cancelled() => Err(StructuredError::cancelled(&self.name)),
            result = bounded => result,
        }
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

fn decode<A: DeserializeOwned>(tool: &str, raw: Value) -> Result<A, StructuredError> {
    serde_json::from_value(raw).map_err(|err| StructuredError::invalid_arguments(tool, &err))
}

fn encode<R: Serialize, E: fmt::Display>(result: Result<R, E>) -> Result<Value, StructuredError> {
    let output = result.map_err(StructuredError::handler_execution)?;
    serde_json::to_value(output).map_err(|err| {
        StructuredError::handler_execution(format!("failed to serialize tool result: {}", err))
    })
}
