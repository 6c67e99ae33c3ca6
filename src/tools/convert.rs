//! Currency conversion tool implementation
//!
//! Implements the `convert(amount, from, to)` MCP tool

use crate::cli::ConvertArgs;
use crate::config::Config;
use crate::currency::format_compact;
use crate::error::{validate_amount, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::tools::util::resolve_currency;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Handle convert tool call (MCP)
pub fn handle_convert(id: Option<Value>, args: Value, config: &Config) -> McpResponse {
    match handle_convert_impl(args, config) {
        Ok(content) => match serde_json::to_value(content) {
            Ok(value) => McpResponse::success(id, value),
            Err(e) => McpResponse::error(id, "internal_error", &e.to_string()),
        },
        Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
    }
}

fn handle_convert_impl(args: Value, config: &Config) -> Result<ToolResult, AppError> {
    let convert_args: ConvertArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_convert(convert_args, config)
}

/// Execute convert tool (shared implementation for MCP and CLI)
pub fn execute_convert(convert_args: ConvertArgs, config: &Config) -> Result<ToolResult, AppError> {
    validate_amount(convert_args.amount)?;
    let from = resolve_currency(Some(convert_args.from.as_deref().unwrap_or("USD")), config)?;
    let to = resolve_currency(convert_args.to.as_deref(), config)?;

    let rates = config.rate_table();
    for code in [&from, &to] {
        if !rates.is_known(code) {
            warn!(
                "No rate for {}, converting 1:1 (known: {})",
                code,
                rates.codes().join(", ")
            );
        }
    }

    let usd = rates.to_usd(convert_args.amount, &from);
    let converted = rates.from_usd(usd, &to);
    debug!("Converted {} {} -> {} USD -> {} {}", convert_args.amount, from, usd, converted, to);

    let markdown = format!(
        "{:.2} {} = {:.2} {} ({} → {})",
        convert_args.amount,
        from,
        converted,
        to,
        format_compact(convert_args.amount, &from),
        format_compact(converted, &to)
    );
    let metadata = json!({
        "amount": convert_args.amount,
        "from": from,
        "to": to,
        "usd": usd,
        "converted": converted,
    });
    Ok(ToolResult::text_with_metadata(markdown, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(amount: f64, from: Option<&str>, to: Option<&str>) -> ConvertArgs {
        ConvertArgs {
            amount,
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        }
    }

    #[test]
    fn test_eur_to_usd() {
        let result = execute_convert(args(5_000_000.0, Some("EUR"), Some("USD")), &Config::default())
            .unwrap();
        let metadata = result.first_metadata().expect("metadata");
        let converted = metadata["converted"].as_f64().unwrap();
        assert!((converted - 5_000_000.0 / 0.92).abs() < 1e-3);
        assert!(result.first_text().starts_with("5000000.00 EUR = "));
        assert!(result.first_text().contains("(€5M → $5.4M)"));
    }

    #[test]
    fn test_defaults_from_usd_to_configured_currency() {
        let config = Config {
            default_currency: "GBP".to_string(),
            ..Default::default()
        };
        let result = execute_convert(args(100.0, None, None), &config).unwrap();
        let metadata = result.first_metadata().expect("metadata");
        assert_eq!(metadata["from"], "USD");
        assert_eq!(metadata["to"], "GBP");
        assert!((metadata["converted"].as_f64().unwrap() - 79.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_currency_is_identity() {
        let result = execute_convert(args(42.0, Some("XYZ"), Some("USD")), &Config::default()).unwrap();
        assert_eq!(result.first_metadata().expect("metadata")["converted"], 42.0);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = execute_convert(args(-1.0, None, None), &Config::default()).unwrap_err();
        assert_eq!(err.error_code(), "invalid_input");
    }
}
