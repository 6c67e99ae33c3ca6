//! Smart-search parser
//!
//! Turns a free-text query into a [`FilterPatch`] plus display badges.
//! Every rule matches against the original query; matched text is stripped
//! from a working copy that becomes the residual free-text search.

use super::patterns::{patterns, PatternKind, SearchPattern};
use super::types::{FilterKey, FilterPatch, ParsedFilter, SmartSearchResult};
use crate::currency::{format_compact, RateTable};
use regex::Captures;
use tracing::debug;

/// Parse a query using the built-in exchange rates
pub fn parse_smart_search(query: &str, current_currency: &str) -> SmartSearchResult {
    parse_smart_search_with(query, current_currency, RateTable::shared())
}

/// Parse a query, converting money amounts with the given rate table.
///
/// Money tokens are read in `current_currency` and stored in USD. Never fails:
/// text that matches no rule is left in the residual search.
pub fn parse_smart_search_with(
    query: &str,
    current_currency: &str,
    rates: &RateTable,
) -> SmartSearchResult {
    let context = MatchContext {
        currency: current_currency,
        rates,
        funding_is_minimum: query.contains('+') || query.to_lowercase().contains("above"),
    };

    let mut filters = FilterPatch::default();
    let mut parsed_filters = Vec::new();
    let mut working = query.to_string();

    for pattern in patterns() {
        for caps in pattern.captures(query) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let Some(parsed) = apply_match(pattern, &caps, &context, &mut filters) else {
                debug!("Dropped unusable {:?} match '{}'", pattern.kind, whole.as_str());
                continue;
            };

            debug!("Detected {} = {} from '{}'", parsed.key, parsed.value, whole.as_str());
            parsed_filters.push(parsed);
            working = working.replacen(whole.as_str(), "", 1);
        }
    }

    let remaining_query = working.trim().to_string();
    filters.search = Some(remaining_query.clone());

    SmartSearchResult {
        filters,
        remaining_query,
        parsed_filters,
    }
}

struct MatchContext<'a> {
    currency: &'a str,
    rates: &'a RateTable,
    funding_is_minimum: bool,
}

/// Write one match into the patch and describe it.
///
/// Returns `None` when the extracted value is unusable (not a finite number,
/// or a USD amount that does not fit in an `i64`),
/// in which case the patch is left untouched.
fn apply_match(
    pattern: &SearchPattern,
    caps: &Captures<'_>,
    context: &MatchContext<'_>,
    filters: &mut FilterPatch,
) -> Option<ParsedFilter> {
    let token = caps.get(1)?.as_str().to_lowercase();

    match pattern.kind {
        PatternKind::FundingAmount => {
            let number: f64 = token.parse().ok().filter(|n: &f64| n.is_finite())?;
            let multiplier = match caps.get(2)?.as_str().to_ascii_lowercase().as_str() {
                "k" => 1e3,
                "m" => 1e6,
                "b" => 1e9,
                _ => return None,
            };
            let amount = number * multiplier;
            let usd = context.rates.to_usd(amount, context.currency).round();
            // Values past the i64 range would saturate instead of failing
            if !usd.is_finite() || usd >= i64::MAX as f64 || usd < i64::MIN as f64 {
                return None;
            }
            let usd = usd as i64;
            let shown = format_compact(amount, context.currency);

            let (key, label) = if context.funding_is_minimum {
                filters.min_funding = Some(usd);
                (FilterKey::MinFunding, format!("Min funding: {}", shown))
            } else {
                filters.max_funding = Some(usd);
                (FilterKey::MaxFunding, format!("Max funding: {}", shown))
            };
            Some(badge(key, usd.to_string(), label))
        }
        PatternKind::GrowthStage => {
            filters.growth_stage = Some(token.clone());
            let label = format!("Stage: {}", capitalize(&token));
            Some(badge(FilterKey::GrowthStage, token, label))
        }
        PatternKind::CustomerFocus => {
            let value = pattern.remapped(&token).unwrap_or(token.as_str()).to_string();
            filters.customer_focus = Some(value.clone());
            let label = format!("Focus: {}", value.to_uppercase());
            Some(badge(FilterKey::CustomerFocus, value, label))
        }
        PatternKind::FundingType => {
            let value = match pattern.remapped(&token) {
                Some(canonical) => canonical.to_string(),
                None => title_case(&token),
            };
            filters.funding_type = Some(value.clone());
            let label = format!("Funding: {}", value);
            Some(badge(FilterKey::FundingType, value, label))
        }
        PatternKind::Rank => {
            let rank: u32 = caps.get(2)?.as_str().parse().ok()?;
            filters.max_rank = Some(rank);
            Some(badge(FilterKey::MaxRank, rank.to_string(), format!("Top {}", rank)))
        }
    }
}

fn badge(key: FilterKey, value: String, label: String) -> ParsedFilter {
    ParsedFilter {
        key,
        value,
        label,
        color: key.color(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `series a` → `Series A`
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}
