//! Company records and dataset loading

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One company in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub rank: u32,
    /// Total funding raised, in USD
    #[serde(rename = "fundingUSD")]
    pub funding_usd: i64,
    pub growth_stage: String,
    pub customer_focus: String,
    pub funding_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Parse a JSON array of companies
pub fn parse_companies(data: &str) -> Result<Vec<Company>, AppError> {
    serde_json::from_str(data)
        .map_err(|e| AppError::DataParse(format!("Invalid company dataset: {}", e)))
}

/// Load a dataset file
pub async fn load_companies(path: &Path) -> Result<Vec<Company>, AppError> {
    let data = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(format!("Dataset file not found: {}", path.display()))
        } else {
            AppError::from(e)
        }
    })?;

    let companies = parse_companies(&data)?;
    debug!("Loaded {} companies from {}", companies.len(), path.display());
    Ok(companies)
}
