//! Utility functions for tools

use crate::config::Config;
use crate::error::{validate_currency, AppError};

/// Pick the explicit currency or fall back to the configured one, upper-cased
pub fn resolve_currency(requested: Option<&str>, config: &Config) -> Result<String, AppError> {
    let code = requested
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(config.default_currency.as_str());
    validate_currency(code)?;
    Ok(code.to_ascii_uppercase())
}

/// Escape text for a markdown table cell
pub fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Wrap every case-insensitive occurrence of the query's words in **bold**,
/// merging overlapping and adjacent ranges
pub fn highlight(text: &str, query: &str) -> String {
    // Each lower-cased char remembers the byte span of the char it came from,
    // so ranges always land on char boundaries of `text`
    let folded: Vec<(char, usize, usize)> = text
        .char_indices()
        .flat_map(|(start, c)| {
            let end = start + c.len_utf8();
            c.to_lowercase().map(move |l| (l, start, end))
        })
        .collect();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for term in query.split_whitespace() {
        let needle: Vec<char> = term.to_lowercase().chars().collect();
        let mut i = 0usize;
        while i + needle.len() <= folded.len() {
            let window = &folded[i..i + needle.len()];
            if window.iter().map(|f| f.0).eq(needle.iter().copied()) {
                ranges.push((window[0].1, window[needle.len() - 1].2));
                i += needle.len();
            } else {
                i += 1;
            }
        }
    }

    if ranges.is_empty() {
        return text.to_string();
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (s, e) in ranges {
        match merged.last_mut() {
            Some(last) if s <= last.1 => last.1 = last.1.max(e),
            _ => merged.push((s, e)),
        }
    }

    let mut res = String::new();
    let mut last_idx = 0usize;
    for (s, e) in merged {
        res.push_str(&text[last_idx..s]);
        res.push_str("**");
        res.push_str(&text[s..e]);
        res.push_str("**");
        last_idx = e;
    }
    res.push_str(&text[last_idx..]);
    res
}
