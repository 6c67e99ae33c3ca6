//! Smart search: free-text query → structured company filters
//!
//! Recognizes funding amounts, growth stages, customer focus, funding types
//! and rank limits in a query, and leaves the rest as plain search text.

pub mod parser;
pub mod patterns;
pub mod types;


pub use parser::{parse_smart_search, parse_smart_search_with};
pub use types::{ColorTag, FilterKey, FilterPatch, ParsedFilter, SmartSearchResult};
