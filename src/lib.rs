//! Company directory smart search
//!
//! Library half of `dirsearch`. The binary wires these modules into a CLI and
//! an MCP stdio server; other callers can use the parser and directory engine
//! directly:
//!
//! - [`smart_search::parse_smart_search`] turns free text into filters
//! - [`currency`] converts amounts through USD
//! - [`directory::DirectoryQuery`] filters, sorts and pages companies

pub mod cli;
pub mod config;
pub mod currency;
pub mod directory;
pub mod error;
pub mod mcp;
pub mod smart_search;
pub mod tools;
