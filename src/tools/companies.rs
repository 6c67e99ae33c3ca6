//! Company listing tool implementation
//!
//! Implements the `companies(data, query, ...)` MCP tool: smart-search the
//! query, merge the detected filters into the listing state, and render one
//! page of the directory.

use crate::cli::CompaniesArgs;
use crate::config::Config;
use crate::currency::{format_compact, RateTable};
use crate::directory::{load_companies, Company, DirectoryQuery, Filters, Page};
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::smart_search::ParsedFilter;
use crate::tools::smart_search::run_smart_search;
use crate::tools::util::{escape_cell, highlight, resolve_currency};
use serde_json::{json, Value};
use std::path::Path;
use tracing::{debug, info};

/// Handle companies tool call (MCP)
pub async fn handle_companies(id: Option<Value>, args: Value, config: &Config) -> McpResponse {
    match handle_companies_impl(args, config).await {
        Ok(content) => match serde_json::to_value(content) {
            Ok(value) => McpResponse::success(id, value),
            Err(e) => McpResponse::error(id, "internal_error", &e.to_string()),
        },
        Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
    }
}

async fn handle_companies_impl(args: Value, config: &Config) -> Result<ToolResult, AppError> {
    let companies_args: CompaniesArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_companies(companies_args, config).await
}

/// Execute companies tool (shared implementation for MCP and CLI)
pub async fn execute_companies(
    companies_args: CompaniesArgs,
    config: &Config,
) -> Result<ToolResult, AppError> {
    if companies_args.data.trim().is_empty() {
        return Err(AppError::InvalidInput("Dataset path cannot be empty".to_string()));
    }

    let companies = load_companies(Path::new(&companies_args.data)).await?;
    list_companies(&companies, &companies_args, config)
}

/// Filter, sort and render an already-loaded dataset
pub fn list_companies(
    companies: &[Company],
    companies_args: &CompaniesArgs,
    config: &Config,
) -> Result<ToolResult, AppError> {
    let currency = resolve_currency(companies_args.currency.as_deref(), config)?;

    let mut filters = Filters::with_page_size(companies_args.page_size.unwrap_or(config.page_size));
    if let Some(sort_by) = companies_args.sort_by {
        filters.sort_by = sort_by;
    }
    if let Some(order) = companies_args.order {
        filters.sort_order = order;
    }

    let mut parsed_filters = Vec::new();
    if let Some(query) = companies_args.query.as_deref() {
        let (result, _) = run_smart_search(query, Some(&currency), config)?;
        filters.merge(&result.filters);
        parsed_filters = result.parsed_filters;
    }
    // Merging resets the page, so an explicit page is applied last
    if let Some(page) = companies_args.page {
        filters.page = page;
    }

    debug!("Listing with filters: {:?}", filters);
    let page = DirectoryQuery::run(companies, &filters);
    info!(
        "Companies request matched {} of {} companies",
        page.total_items,
        companies.len()
    );

    let rates = config.rate_table();
    let markdown = format_companies(&page, &filters, &parsed_filters, &currency, &rates);
    let metadata = json!({
        "filters": filters,
        "parsedFilters": parsed_filters,
        "page": page,
    });
    Ok(ToolResult::text_with_metadata(markdown, metadata))
}

/// Render one page of companies as markdown
pub fn format_companies(
    page: &Page<&Company>,
    filters: &Filters,
    parsed_filters: &[ParsedFilter],
    currency: &str,
    rates: &RateTable,
) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Companies · {} matches\n\n", page.total_items));

    if !parsed_filters.is_empty() {
        let badges: Vec<String> = parsed_filters
            .iter()
            .map(|p| format!("`{}`", p.label))
            .collect();
        md.push_str(&format!(
            "Filters ({} active): {}\n\n",
            filters.active_count(),
            badges.join(" ")
        ));
    }

    if page.items.is_empty() {
        md.push_str("No companies match.\n");
        return md;
    }

    let search = filters.search.as_deref().unwrap_or("");
    md.push_str("| Rank | Company | Stage | Focus | Funding Type | Funding |\n");
    md.push_str("|---|---|---|---|---|---|\n");
    for company in &page.items {
        let funding = rates.from_usd(company.funding_usd as f64, currency);
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            company.rank,
            highlight(&escape_cell(&company.name), search),
            escape_cell(&company.growth_stage),
            escape_cell(&company.customer_focus.to_uppercase()),
            escape_cell(&company.funding_type),
            format_compact(funding, currency)
        ));
    }

    md.push_str(&format!(
        "\nPage {} of {} ({} per page)\n",
        page.page, page.total_pages, page.page_size
    ));
    if page.has_next() {
        md.push_str(&format!("Next page: {}\n", page.page + 1));
    }
    md
}
