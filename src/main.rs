//! dirsearch: company directory smart search, CLI & MCP server
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Implements three tools:
//! - `smart_search(query, currency)` - Extract structured filters from free text
//! - `convert(amount, from, to)` - Convert amounts between currencies
//! - `companies(data, query, ...)` - Filter, sort and page a company dataset

use anyhow::{Context, Result};
use clap::Parser;
use company_directory::cli::{self, Cli, Commands};
use company_directory::error::AppError;
use company_directory::{config, mcp, tools};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        run_cli_mode().await
    } else {
        run_mcp_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let config = config::load_config().context("Failed to load configuration")?;

    let result = match cli.command {
        Some(Commands::Parse { args, json }) => execute_parse_cli(args, json, &config),
        Some(Commands::Convert(args)) => {
            tools::convert::execute_convert(args, &config).map(|r| r.first_text())
        }
        Some(Commands::Companies(args)) => tools::companies::execute_companies(args, &config)
            .await
            .map(|r| r.first_text()),
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    // Handle result and exit with appropriate code
    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Execute parse command in CLI mode
fn execute_parse_cli(
    args: cli::SmartSearchArgs,
    json: bool,
    config: &config::Config,
) -> Result<String, AppError> {
    if !json {
        return tools::smart_search::execute_smart_search(args, config).map(|r| r.first_text());
    }

    let (result, _) =
        tools::smart_search::run_smart_search(&args.query, args.currency.as_deref(), config)?;
    Ok(serde_json::to_string_pretty(&result)?)
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON-RPC stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    info!("Starting dirsearch MCP Server");

    let config = config::load_config().context("Failed to load configuration")?;
    mcp::handle_stdio(config).await?;

    Ok(())
}
