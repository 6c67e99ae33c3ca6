//! CLI mode implementation
//!
//! Provides command-line interface for the directory tools

use crate::directory::{SortField, SortOrder};
use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// dirsearch CLI
#[derive(Parser)]
#[command(name = "dirsearch")]
#[command(about = "Company directory smart search and listing utility", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract structured filters from a free-text query
    Parse {
        #[command(flatten)]
        args: SmartSearchArgs,

        /// Print the raw result as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Convert an amount between currencies
    Convert(ConvertArgs),
    /// List companies from a dataset, filtered by a smart-search query
    Companies(CompaniesArgs),
}

/// Smart search tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct SmartSearchArgs {
    /// Free-text query, e.g. "early stage b2b $1M+ top 50"
    #[schemars(description = "Free-text query, e.g. \"early stage b2b $1M+ top 50\"")]
    pub query: String,

    /// Currency that amounts in the query are written in (defaults to config)
    #[arg(short = 'c', long)]
    #[schemars(description = "Currency that amounts in the query are written in (ISO code, e.g. EUR)")]
    #[serde(default)]
    pub currency: Option<String>,
}

/// Currency conversion tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct ConvertArgs {
    /// Amount to convert
    #[schemars(description = "Amount to convert")]
    pub amount: f64,

    /// Source currency (defaults to USD)
    #[arg(short = 'f', long)]
    #[schemars(description = "Source currency ISO code (default USD)")]
    #[serde(default)]
    pub from: Option<String>,

    /// Target currency (defaults to config)
    #[arg(short = 't', long)]
    #[schemars(description = "Target currency ISO code (default: configured currency)")]
    #[serde(default)]
    pub to: Option<String>,
}

/// Company listing tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct CompaniesArgs {
    /// Path to a JSON dataset of companies
    #[arg(short = 'd', long)]
    #[schemars(description = "Path to a JSON dataset of companies")]
    pub data: String,

    /// Smart-search query
    #[arg(short = 'q', long)]
    #[schemars(description = "Smart-search query, e.g. \"late stage consumer top 20\"")]
    #[serde(default)]
    pub query: Option<String>,

    /// Currency for amounts in the query and in the listing
    #[arg(short = 'c', long)]
    #[schemars(description = "Currency for amounts in the query and in the listing")]
    #[serde(default)]
    pub currency: Option<String>,

    /// Sort column
    #[arg(short = 's', long, value_enum)]
    #[schemars(description = "Sort column: rank, name, funding or foundedYear")]
    #[serde(default, rename = "sortBy")]
    pub sort_by: Option<SortField>,

    /// Sort direction
    #[arg(short = 'o', long, value_enum)]
    #[schemars(description = "Sort direction: asc or desc")]
    #[serde(default)]
    pub order: Option<SortOrder>,

    /// Page number, starting at 1
    #[arg(short = 'p', long)]
    #[schemars(description = "Page number, starting at 1")]
    #[serde(default)]
    pub page: Option<usize>,

    /// Results per page (max 100)
    #[arg(short = 'l', long)]
    #[schemars(description = "Results per page (default from config, max 100)")]
    #[serde(default, rename = "pageSize")]
    pub page_size: Option<usize>,
}
