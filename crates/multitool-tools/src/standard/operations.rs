//! # File Operation Tools
//!
//! Reading and writing files on behalf of the model.

use async_trait::async_trait;
use multitool_core::{CallContext, Tool, TypedTool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Failures of the file operation tools.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("path_required")]
    PathRequired,

    #[error("Failed to read file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create parent directories for '{path}': {source}")]
    CreateDirs {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ReadFileArgs {
    /// The absolute or relative path to the file to read.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadFileResponse {
    pub success: bool,
    pub content: String,
    pub size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct EditFileArgs {
    /// The absolute or relative path to the file to write.
    pub path: String,
    /// The content to write into the file.
    pub content: String,
    /// Create missing parent directories before writing.
    #[serde(default)]
    pub create_dirs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EditFileResponse {
    pub success: bool,
    pub bytes_written: usize,
}

/// File reading tool
#[derive(Debug, Default)]
pub struct ReadFileTool;

impl ReadFileTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TypedTool for ReadFileTool {
    type Args = ReadFileArgs;
    type Output = ReadFileResponse;
    type Error = OperationError;

    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Reads content from a file."
    }

    async fn call(&self, _ctx: &CallContext, args: ReadFileArgs) -> Result<ReadFileResponse, OperationError> {
        tracing::debug!(path = %args.path, "reading file");
        if args.path.is_empty() {
            return Err(OperationError::PathRequired);
        }

        let content = fs::read_to_string(&args.path)
            .await
            .map_err(|source| OperationError::Read {
                path: args.path.clone(),
                source,
            })?;
        Ok(ReadFileResponse {
            success: true,
            size: content.len(),
            content,
        })
    }
}

/// File writing tool
#[derive(Debug, Default)]
pub struct EditFileTool;

impl EditFileTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TypedTool for EditFileTool {
    type Args = EditFileArgs;
    type Output = EditFileResponse;
    type Error = OperationError;

    fn name(&self) -> &str {
        "edit_file"
    }

    fn description(&self) -> &str {
        "Writes content to a file."
    }

    async fn call(&self, _ctx: &CallContext, args: EditFileArgs) -> Result<EditFileResponse, OperationError> {
        tracing::debug!(path = %args.path, bytes = args.content.len(), "writing file");
        if args.path.is_empty() {
            return Err(OperationError::PathRequired);
        }

        if let Some(parent) = args
            .create_dirs
            .then(|| Path::new(&args.path).parent())
            .flatten()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| OperationError::CreateDirs {
                    path: args.path.clone(),
                    source,
                })?;
        }

        fs::write(&args.path, args.content.as_bytes())
            .await
            .map_err(|source| OperationError::Write {
                path: args.path.clone(),
                source,
            })?;
        Ok(EditFileResponse {
            success: true,
            bytes_written: args.content.len(),
        })
    }
}

/// Tools of the `operations` category.
pub fn operation_tools() -> Vec<Tool> {
    vec![
        Tool::from_typed(EditFileTool::new()),
        Tool::from_typed(ReadFileTool::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use multitool_core::ErrorCode;
    use serde_json::json;

    #[tokio::test]
    async fn read_file_returns_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, "hello").unwrap();

        let tool = Tool::from_typed(ReadFileTool::new());
        let result = tool
            .invoke(&CallContext::new(), json!({"path": path.to_str().unwrap()}))
            .await
            .unwrap();

        assert_eq!(result, json!({"success": true, "content": "hello", "size": 5}));
    }

    #[tokio::test]
    async fn read_missing_file_fails_with_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let tool = Tool::from_typed(ReadFileTool::new());
        let err = tool
            .invoke(&CallContext::new(), json!({"path": path.to_str().unwrap()}))
            .await
            .unwrap_err();

        assert!(err.is(ErrorCode::HandlerExecutionError));
        assert!(err.message.starts_with("Failed to read file"));
    }

    #[tokio::test]
    async fn empty_path_is_rejected() {
        let tool = Tool::from_typed(ReadFileTool::new());
        let err = tool
            .invoke(&CallContext::new(), json!({"path": ""}))
            .await
            .unwrap_err();

        assert_eq!(err.message, "path_required");
    }

    #[tokio::test]
    async fn edit_file_writes_and_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/output.txt");

        let tool = Tool::from_typed(EditFileTool::new());
        let result = tool
            .invoke(
                &CallContext::new(),
                json!({"path": path.to_str().unwrap(), "content": "dummy", "create_dirs": true}),
            )
            .await
            .unwrap();

        assert_eq!(result, json!({"success": true, "bytes_written": 5}));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "dummy");
    }

    #[tokio::test]
    async fn edit_file_requires_content() {
        let tool = Tool::from_typed(EditFileTool::new());
        let err = tool
            .invoke(&CallContext::new(), json!({"path": "x.txt"}))
            .await
            .unwrap_err();

        assert!(err.is(ErrorCode::InvalidArguments));
    }

    #[test]
    fn edit_file_schema_marks_create_dirs_optional() {
        let tool = Tool::from_typed(EditFileTool::new());
        assert_eq!(tool.schema().required_fields(), vec!["content", "path"]);
    }
}
