//! Error types and input validation for the directory tools

use serde::Serialize;
use thiserror::Error;

/// Maximum accepted query length, in characters
pub const MAX_QUERY_CHARS: usize = 500;

/// Application error types
#[derive(Debug, Error, Serialize)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Data parse failed: {0}")]
    DataParse(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for MCP responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::DataParse(_) => "data_parse_failed",
            AppError::Io(_) => "io_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Process exit code in CLI mode
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) => 1,
            AppError::NotFound(_) => 3,
            AppError::DataParse(_) | AppError::Io(_) | AppError::Internal(_) => 5,
        }
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::DataParse(err.to_string())
    }
}

/// Convert std::io::Error to AppError
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

/// Validation functions
pub fn validate_query(query: &str) -> Result<(), AppError> {
    if query.chars().count() > MAX_QUERY_CHARS {
        return Err(AppError::InvalidInput(format!(
            "Query too long, maximum {} characters",
            MAX_QUERY_CHARS
        )));
    }

    Ok(())
}

pub fn validate_currency(code: &str) -> Result<(), AppError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid currency code '{}', expected three letters such as USD",
            code
        )));
    }

    Ok(())
}

pub fn validate_amount(amount: f64) -> Result<(), AppError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "Amount must be a finite, non-negative number, got {}",
            amount
        )));
    }

    Ok(())
}

/// Normalize text using Unicode NFKC, so full-width digits and symbols
/// (`＄５Ｍ`) read the same as their ASCII forms
pub fn normalize_text(text: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    text.nfkc().collect::<String>().trim().to_string()
}
