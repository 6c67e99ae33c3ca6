//! Directory filter state
//!
//! `Filters` is the full listing state a caller keeps between queries. Smart
//! search patches are merged into it; merging only ever adds fields.

use super::company::Company;
use crate::smart_search::FilterPatch;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Column to sort the listing by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Rank,
    Name,
    Funding,
    FoundedYear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Complete listing state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub search: Option<String>,
    pub growth_stage: Option<String>,
    pub customer_focus: Option<String>,
    pub funding_type: Option<String>,
    pub min_funding: Option<i64>,
    pub max_funding: Option<i64>,
    pub max_rank: Option<u32>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for Filters {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl Filters {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search: None,
            growth_stage: None,
            customer_focus: None,
            funding_type: None,
            min_funding: None,
            max_funding: None,
            max_rank: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            page: 1,
            page_size,
        }
    }

    /// Merge a smart-search patch.
    ///
    /// Only fields present in the patch are written; nothing is cleared.
    /// Returns whether any field changed, in which case the page resets to 1.
    pub fn merge(&mut self, patch: &FilterPatch) -> bool {
        let mut changed = false;
        changed |= merge_field(&mut self.search, &patch.search);
        changed |= merge_field(&mut self.growth_stage, &patch.growth_stage);
        changed |= merge_field(&mut self.customer_focus, &patch.customer_focus);
        changed |= merge_field(&mut self.funding_type, &patch.funding_type);
        changed |= merge_field(&mut self.min_funding, &patch.min_funding);
        changed |= merge_field(&mut self.max_funding, &patch.max_funding);
        changed |= merge_field(&mut self.max_rank, &patch.max_rank);

        if changed {
            self.page = 1;
        }
        changed
    }

    /// Whether a company passes every active filter
    pub fn matches(&self, company: &Company) -> bool {
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                let needle = search.to_lowercase();
                if !company.name.to_lowercase().contains(&needle)
                    && !company.description.to_lowercase().contains(&needle)
                {
                    return false;
                }
            }
        }

        if !same_ignoring_case(&self.growth_stage, &company.growth_stage)
            || !same_ignoring_case(&self.customer_focus, &company.customer_focus)
            || !same_ignoring_case(&self.funding_type, &company.funding_type)
        {
            return false;
        }

        if self.min_funding.is_some_and(|min| company.funding_usd < min) {
            return false;
        }
        if self.max_funding.is_some_and(|max| company.funding_usd > max) {
            return false;
        }
        if self.max_rank.is_some_and(|max| company.rank > max) {
            return false;
        }

        true
    }

    /// Number of structured filters in effect (search text excluded)
    pub fn active_count(&self) -> usize {
        [
            self.growth_stage.is_some(),
            self.customer_focus.is_some(),
            self.funding_type.is_some(),
            self.min_funding.is_some(),
            self.max_funding.is_some(),
            self.max_rank.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

fn merge_field<T: Clone + PartialEq>(target: &mut Option<T>, source: &Option<T>) -> bool {
    match source {
        Some(value) if target.as_ref() != Some(value) => {
            *target = Some(value.clone());
            true
        }
        _ => false,
    }
}

fn same_ignoring_case(filter: &Option<String>, actual: &str) -> bool {
    filter
        .as_deref()
        .map_or(true, |wanted| wanted.eq_ignore_ascii_case(actual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::company::fixtures::{company, sample};
    use crate::smart_search::parse_smart_search;

    #[test]
    fn test_merge_only_adds() {
        let mut filters = Filters {
            growth_stage: Some("late".into()),
            max_rank: Some(10),
            page: 4,
            ..Default::default()
        };

        let patch = FilterPatch {
            customer_focus: Some("b2b".into()),
            ..Default::default()
        };
        assert!(filters.merge(&patch));

        assert_eq!(filters.growth_stage.as_deref(), Some("late"));
        assert_eq!(filters.max_rank, Some(10));
        assert_eq!(filters.customer_focus.as_deref(), Some("b2b"));
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_merge_without_changes_keeps_page() {
        let mut filters = Filters {
            max_rank: Some(10),
            page: 3,
            ..Default::default()
        };
        let patch = FilterPatch {
            max_rank: Some(10),
            ..Default::default()
        };
        assert!(!filters.merge(&patch));
        assert_eq!(filters.page, 3);
        assert!(!filters.merge(&FilterPatch::default()));
    }

    #[test]
    fn test_merge_parser_output() {
        let mut filters = Filters::default();
        filters.merge(&parse_smart_search("early stage b2b $1M+ top 50", "USD").filters);
        assert_eq!(filters.growth_stage.as_deref(), Some("early"));
        assert_eq!(filters.min_funding, Some(1_000_000));
        assert_eq!(filters.max_rank, Some(50));
        assert_eq!(filters.search.as_deref(), Some(""));
        assert_eq!(filters.active_count(), 4);
    }

    #[test]
    fn test_matches_search_text() {
        let companies = sample();
        let filters = Filters {
            search: Some("AUTOMATION".into()),
            ..Default::default()
        };
        let names: Vec<&str> = companies
            .iter()
            .filter(|c| filters.matches(c))
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Acme Robotics", "Cobalt Ledger"]);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let filters = Filters {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert!(sample().iter().all(|c| filters.matches(c)));
    }

    #[test]
    fn test_matches_enums_ignoring_case() {
        let filters = Filters {
            funding_type: Some("series a".into()),
            customer_focus: Some("B2B".into()),
            ..Default::default()
        };
        let companies = sample();
        assert!(filters.matches(&companies[0]));
        assert!(!filters.matches(&companies[1]));
    }

    #[test]
    fn test_funding_bounds_are_inclusive() {
        let c = company("x", "X", 1, 5_000_000);
        let filters = Filters {
            min_funding: Some(5_000_000),
            max_funding: Some(5_000_000),
            ..Default::default()
        };
        assert!(filters.matches(&c));

        let filters = Filters {
            max_funding: Some(4_999_999),
            ..Default::default()
        };
        assert!(!filters.matches(&c));
    }

    #[test]
    fn test_max_rank() {
        let filters = Filters {
            max_rank: Some(12),
            ..Default::default()
        };
        let ranks: Vec<u32> = sample()
            .iter()
            .filter(|c| filters.matches(c))
            .map(|c| c.rank)
            .collect();
        assert_eq!(ranks, vec![3, 12]);
    }

    #[test]
    fn test_sort_enums_serialize() {
        assert_eq!(serde_json::to_value(SortField::FoundedYear).unwrap(), "foundedYear");
        assert_eq!(serde_json::to_value(SortOrder::Desc).unwrap(), "desc");
    }
}
