//! Error Types
//!
//! Every failure the engine raises is a [`StructuredError`]: a machine-readable
//! code plus a human message. Structured errors are ordinary Rust errors, but
//! they are also response content: the dispatcher embeds them in the response
//! tree at the slot where the failure happened instead of propagating them.
//!
//! Only a request that cannot be decoded at all (or that names no categories)
//! surfaces as a call-level [`HandleError`].

use crate::protocol::ToolkitResponse;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Codes raised by the dispatch engine itself.
///
/// The wire representation of a [`StructuredError`] keeps its code as a plain
/// string, so handlers and foreign producers may use codes outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The top-level payload failed to decode.
    InvalidInputJson,
    /// The request listed zero categories.
    NoToolkitParents,
    /// A requested category is not registered.
    ParentNotFound,
    /// A requested tool is not registered in its category.
    ChildNotFound,
    /// A tool's argument payload does not match its argument shape.
    InvalidArguments,
    /// The bound handler returned a failure.
    HandlerExecutionError,
    /// The call was cancelled before or while the handler ran.
    Cancelled,
    /// The handler exceeded the configured per-tool deadline.
    HandlerTimeout,
}

impl ErrorCode {
    /// Wire name of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInputJson => "invalid_input_json",
            ErrorCode::NoToolkitParents => "no_toolkit_parents",
            ErrorCode::ParentNotFound => "parent_not_found",
            ErrorCode::ChildNotFound => "child_not_found",
            ErrorCode::InvalidArguments => "invalid_arguments",
            ErrorCode::HandlerExecutionError => "handler_execution_error",
            ErrorCode::Cancelled => "cancelled",
            ErrorCode::HandlerTimeout => "handler_timeout",
        }
    }

    /// Parse a wire code back into an engine code.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "invalid_input_json" => Some(ErrorCode::InvalidInputJson),
            "no_toolkit_parents" => Some(ErrorCode::NoToolkitParents),
            "parent_not_found" => Some(ErrorCode::ParentNotFound),
            "child_not_found" => Some(ErrorCode::ChildNotFound),
            "invalid_arguments" => Some(ErrorCode::InvalidArguments),
            "handler_execution_error" => Some(ErrorCode::HandlerExecutionError),
            "cancelled" => Some(ErrorCode::Cancelled),
            "handler_timeout" => Some(ErrorCode::HandlerTimeout),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable failure embedded in response trees.
///
/// Serializes as `{"Code": "...", "Message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct StructuredError {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl StructuredError {
    /// Create an error with an arbitrary code.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create an error carrying one of the engine codes.
    pub fn with_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code.as_str(), message)
    }

    pub fn invalid_input_json(err: &serde_json::Error) -> Self {
        Self::with_code(
            ErrorCode::InvalidInputJson,
            format!("error decoding toolkit request: {}", err),
        )
    }

    pub fn no_toolkit_parents() -> Self {
        Self::with_code(
            ErrorCode::NoToolkitParents,
            "No toolkit parents specified in the request",
        )
    }

    pub fn parent_not_found(category: &str) -> Self {
        Self::with_code(
            ErrorCode::ParentNotFound,
            format!("Parent toolkit '{}' not registered", category),
        )
    }

    pub fn child_not_found(category: &str, tool: &str) -> Self {
        Self::with_code(
            ErrorCode::ChildNotFound,
            format!("Child tool '{}' not found in parent '{}'", tool, category),
        )
    }

    pub fn invalid_arguments(tool: &str, err: &serde_json::Error) -> Self {
        Self::with_code(
            ErrorCode::InvalidArguments,
            format!("invalid arguments for '{}': {}", tool, err),
        )
    }

    /// Wrap a handler failure, keeping only its message.
    pub fn handler_execution(message: impl fmt::Display) -> Self {
        Self::with_code(ErrorCode::HandlerExecutionError, message.to_string())
    }

    pub fn cancelled(tool: &str) -> Self {
        Self::with_code(
            ErrorCode::Cancelled,
            format!("call cancelled before '{}' completed", tool),
        )
    }

    pub fn handler_timeout(tool: &str, timeout_ms: u64) -> Self {
        Self::with_code(
            ErrorCode::HandlerTimeout,
            format!("'{}' timed out after {}ms", tool, timeout_ms),
        )
    }

    /// The engine code, if the code is one the engine raises.
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_name(&self.code)
    }

    /// Whether this error carries `code`.
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code.as_str()
    }
}

/// Call-level failure of [`Toolkit::handle`](crate::Toolkit::handle).
///
/// Carries the structured error together with the response tree that was
/// produced anyway, so callers can either fail the call or forward the
/// response to the model.
#[derive(Debug, Clone, Error)]
#[error("toolkit request rejected: {error}")]
pub struct HandleError {
    pub error: StructuredError,
    pub response: ToolkitResponse,
}

impl HandleError {
    pub fn code(&self) -> &str {
        &self.error.code
    }

    /// Discard the error and keep the response tree.
    pub fn into_response(self) -> ToolkitResponse {
        self.response
    }
}

/// Errors raised while loading a [`ToolkitConfig`](crate::ToolkitConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}
