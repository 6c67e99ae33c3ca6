//! MCP tools implementation

pub mod companies;
pub mod convert;
pub mod smart_search;
pub mod util;
