//! Subcommand implementations.

use multitool_core::{CallContext, ConfigError, DispatchMode, Toolkit, ToolkitConfig};
use multitool_tools::example_toolkit_with;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read request from '{source_name}': {source}")]
    Input {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct HandleOptions {
    pub input: String,
    pub config: Option<PathBuf>,
    pub concurrent: bool,
    pub pretty: bool,
}

fn load_toolkit(config: Option<&PathBuf>, concurrent: bool) -> Result<Toolkit, CliError> {
    let mut config = match config {
        Some(path) => ToolkitConfig::load_from_file(path)?,
        None => ToolkitConfig::default(),
    };
    if concurrent {
        config = config.with_dispatch(DispatchMode::Concurrent);
    }
    Ok(example_toolkit_with(config))
}

fn read_input(input: &str) -> Result<Vec<u8>, CliError> {
    let read = if input == "-" {
        let mut buffer = Vec::new();
        std::io::stdin().read_to_end(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read(input)
    };
    read.map_err(|source| CliError::Input {
        source_name: input.to_string(),
        source,
    })
}

fn print_json(value: &impl serde::Serialize, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}

pub async fn run_handle(options: HandleOptions) -> Result<ExitCode, CliError> {
    let toolkit = load_toolkit(options.config.as_ref(), options.concurrent)?;
    let raw = read_input(&options.input)?;

    let ctx = CallContext::new();
    let interrupt = ctx.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling outstanding tools");
            interrupt.cancel();
        }
    });

    let outcome = toolkit.handle(&ctx, &raw).await;
    watcher.abort();

    match outcome {
        Ok(response) => {
            print_json(&response, options.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(code = %err.code(), message = %err.error.message, "request failed");
            print_json(&err.into_response(), options.pretty)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn run_manifest() -> Result<ExitCode, CliError> {
    println!("{}", load_toolkit(None, false)?.manifest());
    Ok(ExitCode::SUCCESS)
}

pub fn run_schema(provider: Option<String>, config: Option<PathBuf>) -> Result<ExitCode, CliError> {
    let toolkit = load_toolkit(config.as_ref(), false)?;
    let provider = provider.unwrap_or_else(|| toolkit.config().default_provider.clone());
    let schema: Value = toolkit.export_schema(&provider);
    print_json(&schema, true)?;
    Ok(ExitCode::SUCCESS)
}

pub fn run_definition(
    provider: Option<String>,
    config: Option<PathBuf>,
) -> Result<ExitCode, CliError> {
    let toolkit = load_toolkit(config.as_ref(), false)?;
    let provider = provider.unwrap_or_else(|| toolkit.config().default_provider.clone());
    print_json(&toolkit.tool_definition(&provider), true)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn concurrent_flag_overrides_config() {
        let toolkit = load_toolkit(None, true).unwrap();
        assert_eq!(toolkit.config().dispatch, DispatchMode::Concurrent);
    }

    #[test]
    fn config_file_is_applied() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tool_timeout_ms = 1500").unwrap();

        let toolkit = load_toolkit(Some(&file.path().to_path_buf()), false).unwrap();
        assert_eq!(toolkit.config().tool_timeout_ms, Some(1500));
        assert_eq!(toolkit.config().dispatch, DispatchMode::Sequential);
    }

    #[test]
    fn invalid_config_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tool_timeout_ms = 0").unwrap();

        let err = load_toolkit(Some(&file.path().to_path_buf()), false).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid { .. })));
    }

    #[test]
    fn missing_input_file_is_reported() {
        let err = read_input("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
