//! Listing query: filter, sort, paginate

use super::company::Company;
use super::filters::{Filters, SortField, SortOrder, MAX_PAGE_SIZE};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Runs listing queries over an in-memory dataset
pub struct DirectoryQuery;

impl DirectoryQuery {
    /// Apply `filters` to `companies`: filter, stable sort, then slice the page.
    ///
    /// Page numbers below 1 are treated as 1 and the page size is clamped to
    /// `1..=MAX_PAGE_SIZE`. A page past the end is returned empty.
    pub fn run<'a>(companies: &'a [Company], filters: &Filters) -> Page<&'a Company> {
        let mut matched: Vec<&Company> = companies.iter().filter(|c| filters.matches(c)).collect();

        matched.sort_by(|a, b| {
            let ordering = compare(a, b, filters.sort_by);
            match filters.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let page_size = filters.page_size.clamp(1, MAX_PAGE_SIZE);
        let page = filters.page.max(1);
        let total_items = matched.len();
        let total_pages = total_items.div_ceil(page_size);

        let items: Vec<&Company> = matched
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        debug!(
            "Directory query matched {} companies, page {}/{}",
            total_items, page, total_pages
        );

        Page {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

fn compare(a: &Company, b: &Company, field: SortField) -> Ordering {
    match field {
        SortField::Rank => a.rank.cmp(&b.rank),
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Funding => a.funding_usd.cmp(&b.funding_usd),
        SortField::FoundedYear => a.founded_year.cmp(&b.founded_year),
    }
}
