//! Standard tool implementations, grouped by the category they belong to.

#[cfg(feature = "io")]
pub mod operations;
#[cfg(feature = "response")]
pub mod response;
#[cfg(feature = "search")]
pub mod search;

#[cfg(feature = "io")]
pub use operations::{EditFileTool, OperationError, ReadFileTool, operation_tools};
#[cfg(feature = "response")]
pub use response::{ModelResponseTool, ModelThinkingTool, response_tools};
#[cfg(feature = "search")]
pub use search::{FetchUrlTool, SearchError, SearchWebTool, search_tools};
