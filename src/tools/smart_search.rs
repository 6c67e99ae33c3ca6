//! Smart search tool implementation
//!
//! Implements the `smart_search(query, currency)` MCP tool

use crate::cli::SmartSearchArgs;
use crate::config::Config;
use crate::error::{normalize_text, validate_query, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::smart_search::{parse_smart_search_with, SmartSearchResult};
use crate::tools::util::{escape_cell, resolve_currency};
use serde_json::Value;
use tracing::{debug, info};

/// Handle smart_search tool call (MCP)
pub fn handle_smart_search(id: Option<Value>, args: Value, config: &Config) -> McpResponse {
    match handle_smart_search_impl(args, config) {
        Ok(content) => match serde_json::to_value(content) {
            Ok(value) => McpResponse::success(id, value),
            Err(e) => McpResponse::error(id, "internal_error", &e.to_string()),
        },
        Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
    }
}

fn handle_smart_search_impl(args: Value, config: &Config) -> Result<ToolResult, AppError> {
    let search_args: SmartSearchArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_smart_search(search_args, config)
}

/// Run the parser and return the parse result (shared by the tools)
pub fn run_smart_search(
    query: &str,
    currency: Option<&str>,
    config: &Config,
) -> Result<(SmartSearchResult, String), AppError> {
    validate_query(query)?;
    let currency = resolve_currency(currency, config)?;
    let query = normalize_text(query);

    debug!("Smart search for '{}' in {}", query, currency);
    let result = parse_smart_search_with(&query, &currency, &config.rate_table());
    Ok((result, currency))
}

/// Execute smart search tool (shared implementation for MCP and CLI)
pub fn execute_smart_search(
    search_args: SmartSearchArgs,
    config: &Config,
) -> Result<ToolResult, AppError> {
    let (result, currency) =
        run_smart_search(&search_args.query, search_args.currency.as_deref(), config)?;

    info!(
        "Smart search detected {} filter(s), remaining '{}'",
        result.parsed_filters.len(),
        result.remaining_query
    );

    let markdown = format_smart_search(&search_args.query, &currency, &result);
    let metadata = serde_json::to_value(&result)?;
    Ok(ToolResult::text_with_metadata(markdown, metadata))
}

/// Render a parse result as markdown
pub fn format_smart_search(query: &str, currency: &str, result: &SmartSearchResult) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Smart Search · {} filters\n\n", result.parsed_filters.len()));
    md.push_str(&format!("Query: `{}` ({})\n\n", query.trim(), currency));

    if result.filters.has_no_structured_fields() {
        md.push_str("No filters detected.\n\n");
    } else {
        md.push_str("| Filter | Value | Label | Color |\n");
        md.push_str("|---|---|---|---|\n");
        for parsed in &result.parsed_filters {
            md.push_str(&format!(
                "| {} | {} | {} | {:?} |\n",
                parsed.key,
                escape_cell(&parsed.value),
                escape_cell(&parsed.label),
                parsed.color
            ));
        }
        md.push('\n');
    }

    if result.remaining_query.is_empty() {
        md.push_str("Remaining search: _(none)_\n");
    } else {
        md.push_str(&format!("Remaining search: `{}`\n", result.remaining_query));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_execute_returns_markdown_and_metadata() {
        let args = SmartSearchArgs {
            query: "early stage b2b $1M+ top 50".to_string(),
            currency: Some("usd".to_string()),
        };
        let result = execute_smart_search(args, &Config::default()).unwrap();

        let text = result.first_text();
        assert!(text.contains("# Smart Search · 4 filters"));
        assert!(text.contains("| growthStage | early | Stage: Early | Blue |"));
        assert!(text.contains("Remaining search: _(none)_"));

        let metadata = result.first_metadata().expect("metadata");
        assert_eq!(metadata["filters"]["minFunding"], 1_000_000);
        assert_eq!(metadata["parsedFilters"][0]["type"], "minFunding");
    }

    #[test]
    fn test_uses_configured_currency_and_rates() {
        let mut config = Config {
            default_currency: "EUR".to_string(),
            ..Default::default()
        };
        config.rates.insert("EUR".to_string(), 0.5);

        let (result, currency) = run_smart_search("3m", None, &config).unwrap();
        assert_eq!(currency, "EUR");
        assert_eq!(result.filters.max_funding, Some(6_000_000));
    }

    #[test]
    fn test_full_width_input_is_normalized() {
        let (result, _) = run_smart_search("ｔｏｐ １０", Some("USD"), &Config::default()).unwrap();
        assert_eq!(result.filters.max_rank, Some(10));
    }

    #[test]
    fn test_invalid_currency_is_rejected() {
        let args = SmartSearchArgs {
            query: "top 5".to_string(),
            currency: Some("dollars".to_string()),
        };
        let err = execute_smart_search(args, &Config::default()).unwrap_err();
        assert_eq!(err.error_code(), "invalid_input");
    }

    #[test]
    fn test_handle_reports_bad_arguments() {
        let resp = handle_smart_search(Some(json!(1)), json!({ "currency": "USD" }), &Config::default());
        assert_eq!(resp.error.expect("error").code, "invalid_input");
    }

    #[test]
    fn test_format_without_filters() {
        let result = crate::smart_search::parse_smart_search("acme", "USD");
        let md = format_smart_search("acme", "USD", &result);
        assert!(md.contains("No filters detected."));
        assert!(md.contains("Remaining search: `acme`"));
    }
}
