use anyhow::Result;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use std::path::PathBuf;
use tracing_subscriber::{self, filter::EnvFilter};

use docstub_mcp::{config::ServiceConfig, docstub_service::DocStubService};

/// Doc Stub MCP Server - JSDoc and VSDoc comment stubs for JavaScript and TypeScript
#[derive(Parser, Debug)]
#[command(name = "docstub-mcp")]
#[command(about = "Model Context Protocol server that generates doc comment stubs")]
#[command(version)]
struct Args {
    /// Root directories files may be read from (can be specified multiple times)
    #[arg(
        short = 'd',
        long = "root-dir",
        help = "Root directory files may be read from (default: current directory)",
        value_name = "PATH"
    )]
    root_directories: Vec<PathBuf>,

    /// Maximum file size to process (in bytes)
    #[arg(
        long = "max-file-size",
        default_value = "10485760", // 10MB
        help = "Maximum file size to process in bytes"
    )]
    max_file_size: u64,

    /// Options file to use instead of discovering .docstub.yml
    #[arg(
        short = 'c',
        long = "options-file",
        help = "Options file (default: nearest .docstub.yml above the first root, then ~/.docstub.yml)",
        value_name = "PATH"
    )]
    options_file: Option<PathBuf>,
}

#[tokio::main]
#[tracing::instrument]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting MCP server with config: {:?}", args);

    let config = create_config_from_args(args)?;

    let service = DocStubService::with_config(config)?.serve(stdio()).await?;

    tracing::info!("Service started, waiting for connections");
    service.waiting().await?;
    Ok(())
}

/// Create a ServiceConfig from command line arguments
fn create_config_from_args(args: Args) -> Result<ServiceConfig> {
    let root_directories = if args.root_directories.is_empty() {
        vec![std::env::current_dir()?]
    } else {
        args.root_directories
    };

    Ok(ServiceConfig {
        max_file_size: args.max_file_size,
        root_directories,
        options_file: args.options_file,
    })
}
