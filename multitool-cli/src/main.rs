use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{HandleOptions, run_definition, run_handle, run_manifest, run_schema};

#[derive(Parser, Debug)]
#[command(name = "multitool", version = "0.2.0")]
#[command(about = "Multitool CLI - hierarchical tool dispatch for the example toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dispatch a toolkit request read from a file or stdin
    Handle {
        /// Request file, `-` for stdin
        #[arg(long, default_value = "-")]
        input: String,
        /// TOML toolkit configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Run the tools of each category concurrently
        #[arg(long)]
        concurrent: bool,
        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },
    /// Print the model-facing toolkit manifest
    Manifest,
    /// Print the request schema for a provider
    Schema {
        /// Provider name; defaults to the configured provider
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the tool definition exposing the toolkit to a provider
    Definition {
        /// Provider name; defaults to the configured provider
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // JSON logs go to stderr so stdout stays a clean response stream.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .try_init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Handle {
            input,
            config,
            concurrent,
            pretty,
        } => {
            run_handle(HandleOptions {
                input,
                config,
                concurrent,
                pretty,
            })
            .await
        }
        Commands::Manifest => run_manifest(),
        Commands::Schema { provider, config } => run_schema(provider, config),
        Commands::Definition { provider, config } => run_definition(provider, config),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}
