//! # Multitool Core
//!
//! Hierarchical dispatch of many tool calls in one request.
//!
//! A [`Toolkit`] holds named [`Category`] values, each holding named
//! [`Tool`]s. A single request lists categories and, inside each, the tools to
//! run with their JSON arguments. [`Toolkit::handle`] runs them in request
//! order and returns a response tree with exactly one entry per requested
//! category and tool. Failures never abort the call: they are recorded as
//! [`StructuredError`] values in the slot where they happened.
//!
//! Tools are bound to a concrete argument type. The argument schema is
//! derived from that type once, at construction, and inlined into the
//! model-facing [`Toolkit::manifest`].

pub mod category;
pub mod config;
pub mod context;
pub mod error;
mod manifest;
pub mod observer;
pub mod protocol;
pub mod schema;
pub mod tool;
pub mod toolkit;

pub use category::{Category, DispatchOptions};
pub use config::{DispatchMode, ToolkitConfig};
pub use context::CallContext;
pub use error::{ConfigError, ErrorCode, HandleError, StructuredError};
pub use observer::{DispatchObserver, NoopObserver, TracingObserver};
pub use protocol::{
    CategoryRequest, CategoryResponse, ToolOutcome, ToolRequest, ToolResponse, ToolkitRequest,
    ToolkitResponse,
};
pub use schema::{ArgumentSchema, SchemaProvider, ToolDefinition, json_schema_value};
pub use tool::{Tool, TypedTool};
pub use toolkit::{Toolkit, ToolkitBuilder};
