use serde::{Deserialize, Serialize};
use std::fmt;

/// Which filter field a detected token sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    MinFunding,
    MaxFunding,
    GrowthStage,
    CustomerFocus,
    FundingType,
    MaxRank,
}

impl FilterKey {
    /// Badge color for this filter type
    pub fn color(self) -> ColorTag {
        match self {
            FilterKey::MinFunding | FilterKey::MaxFunding => ColorTag::Orange,
            FilterKey::GrowthStage => ColorTag::Blue,
            FilterKey::CustomerFocus => ColorTag::Purple,
            FilterKey::FundingType => ColorTag::Orange,
            FilterKey::MaxRank => ColorTag::Yellow,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::MinFunding => "minFunding",
            FilterKey::MaxFunding => "maxFunding",
            FilterKey::GrowthStage => "growthStage",
            FilterKey::CustomerFocus => "customerFocus",
            FilterKey::FundingType => "fundingType",
            FilterKey::MaxRank => "maxRank",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Orange,
    Blue,
    Purple,
    Yellow,
}

/// One detected filter, for display as a badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedFilter {
    #[serde(rename = "type")]
    pub key: FilterKey,
    /// Canonical value as written into the patch
    pub value: String,
    /// Human-readable label
    pub label: String,
    pub color: ColorTag,
}

/// Partial filter state in canonical units (USD, lower-case enum values)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_funding: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_funding: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FilterPatch {
    /// True when no structured field (anything besides `search`) is set
    pub fn has_no_structured_fields(&self) -> bool {
        self.growth_stage.is_none()
            && self.customer_focus.is_none()
            && self.funding_type.is_none()
            && self.min_funding.is_none()
            && self.max_funding.is_none()
            && self.max_rank.is_none()
    }
}

/// Result of parsing one smart-search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartSearchResult {
    pub filters: FilterPatch,
    pub remaining_query: String,
    pub parsed_filters: Vec<ParsedFilter>,
}
