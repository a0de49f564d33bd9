//! # Multitool Tools
//!
//! Standard tools for Multitool toolkits and a ready-made example toolkit.
//!
//! ## Features
//!
//! - **I/O Tools** (`io`): reading and writing files
//! - **Search Tools** (`search`): mocked web search and URL fetching
//! - **Response Tools** (`response`): surfacing model thinking and answers
//!
//! Every tool is a [`TypedTool`](multitool_core::TypedTool); bind it with
//! [`Tool::from_typed`](multitool_core::Tool::from_typed) or take a whole
//! category's worth from the `*_tools()` helpers.

/// Example toolkit wiring the standard tools into categories.
pub mod example;
/// Standard tool library.
pub mod standard;

pub use example::{EXAMPLE_TOOLKIT_NAME, example_toolkit, example_toolkit_with};
pub use standard::*;
