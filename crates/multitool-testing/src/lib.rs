//! # Multitool Testing
//!
//! Utilities for testing toolkits and the tools registered in them.
//!
//! ## Components
//!
//! - **Mock Tools**: tools with scripted results that record every call
//! - **Recording Observer**: captures dispatch diagnostics for assertions
//! - **Fixtures**: request builders and small ready-made categories
//!
//! ## Usage
//!
//! ```rust
//! use multitool_core::{CallContext, Category, Toolkit};
//! use multitool_testing::{MockTool, request};
//! use serde_json::json;
//!
//! let echo = MockTool::new("echo").with_default_response(json!("pong"));
//! let toolkit = Toolkit::new("tk", [Category::new("p", "d", [echo.tool()])]);
//!
//! let raw = request("tk", &[("p", &[("echo", json!({"ping": 1}))])]);
//! let response = tokio_test::block_on(toolkit.handle(&CallContext::new(), &raw)).unwrap();
//!
//! assert_eq!(response.categories[0].tools[0].result.as_success(), Some(&json!("pong")));
//! assert_eq!(echo.call_count(), 1);
//! ```

/// Fixture builders for requests and categories
pub mod fixtures;
/// Mock tools for predictable testing
pub mod mock_tools;
/// Observer that records diagnostics
pub mod recording;

pub use fixtures::{echo_category, request, request_value};
pub use mock_tools::MockTool;
pub use recording::{ObservedEvent, RecordingObserver};
