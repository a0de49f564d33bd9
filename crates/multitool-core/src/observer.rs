//! Observability hook for registry construction and dispatch.
//!
//! The engine never logs on its own. It reports what happened to a
//! [`DispatchObserver`]; the default [`TracingObserver`] forwards the events to
//! `tracing`, and tests can substitute their own observer to assert on them.

use crate::error::StructuredError;
use std::time::Duration;

/// Receives diagnostics from toolkit construction and request processing.
///
/// Every method has an empty default so implementors only override the
/// events they care about.
pub trait DispatchObserver: Send + Sync {
    /// A category name was registered more than once; the last one wins.
    fn duplicate_category(&self, _category: &str) {}

    /// A tool name was registered more than once in a category; the last one wins.
    fn duplicate_tool(&self, _category: &str, _tool: &str) {}

    /// An absent category entry was skipped during construction.
    fn absent_category_skipped(&self, _toolkit: &str) {}

    /// The raw request payload could not be decoded.
    fn request_rejected(&self, _toolkit: &str, _error: &StructuredError) {}

    /// A request named a category that is not registered.
    fn category_not_found(&self, _category: &str) {}

    /// A request named a tool that its category does not hold.
    fn tool_not_found(&self, _category: &str, _tool: &str) {}

    /// A tool slot was filled with an error.
    fn tool_failed(&self, _category: &str, _tool: &str, _error: &StructuredError) {}

    /// A tool handler returned a result.
    fn tool_completed(&self, _category: &str, _tool: &str, _elapsed: Duration) {}

    /// Schema export was asked for a provider the engine does not know.
    fn unsupported_provider(&self, _requested: &str, _fallback: &str) {}
}

/// Observer that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}

/// Observer that emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn duplicate_category(&self, category: &str) {
        tracing::warn!(category, "duplicate category name, overwriting earlier registration");
    }

    fn duplicate_tool(&self, category: &str, tool: &str) {
        tracing::warn!(category, tool, "duplicate tool name, overwriting earlier registration");
    }

    fn absent_category_skipped(&self, toolkit: &str) {
        tracing::warn!(toolkit, "absent category provided to toolkit builder, skipping");
    }

    fn request_rejected(&self, toolkit: &str, error: &StructuredError) {
        tracing::warn!(toolkit, code = %error.code, message = %error.message, "toolkit request rejected");
    }

    fn category_not_found(&self, category: &str) {
        tracing::warn!(category, "requested category not found");
    }

    fn tool_not_found(&self, category: &str, tool: &str) {
        tracing::warn!(category, tool, "requested tool not found");
    }

    fn tool_failed(&self, category: &str, tool: &str, error: &StructuredError) {
        tracing::warn!(
            category,
            tool,
            code = %error.code,
            message = %error.message,
            "tool call failed"
        );
    }

    fn tool_completed(&self, category: &str, tool: &str, elapsed: Duration) {
        tracing::debug!(
            category,
            tool,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "tool call completed"
        );
    }

    fn unsupported_provider(&self, requested: &str, fallback: &str) {
        tracing::warn!(requested, fallback, "unsupported schema provider, using fallback");
    }
}
