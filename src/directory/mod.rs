//! In-memory company directory
//!
//! Dataset loading plus the filter → sort → paginate listing query that the
//! smart-search output feeds into.

pub mod company;
pub mod filters;
pub mod query;

pub use company::{load_companies, parse_companies, Company};
pub use filters::{Filters, SortField, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use query::{DirectoryQuery, Page};
