//! # Multitool
//!
//! Many tool calls, one request. Re-exports the dispatch engine and the
//! standard tools so applications depend on a single crate.

pub use multitool_core::*;
pub use multitool_tools as tools;
pub use multitool_tools::{example_toolkit, example_toolkit_with};
