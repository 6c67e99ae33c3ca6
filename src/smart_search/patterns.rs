//! Smart-search rule table
//!
//! Ordered list of pattern rules. Order matters: rules run in sequence and
//! each match is stripped from the residual query before the next rule's
//! matches are stripped.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// What a rule extracts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// `$5M`, `1.5b+`, `500k-`
    FundingAmount,
    /// `early`, `late stage`
    GrowthStage,
    /// `b2b`, `consumer`
    CustomerFocus,
    /// `series a`, `debt`
    FundingType,
    /// `top 50`, `rank 10`
    Rank,
}

/// One rule of the table
#[derive(Debug)]
pub struct SearchPattern {
    pub kind: PatternKind,
    pub regex: Regex,
    /// Reject matches that directly follow an ASCII letter
    pub reject_after_letter: bool,
    /// Lower-case token → canonical value
    pub remap: &'static [(&'static str, &'static str)],
}

const CUSTOMER_FOCUS_REMAP: &[(&str, &str)] = &[("business", "b2b"), ("consumer", "b2c")];

const FUNDING_TYPE_REMAP: &[(&str, &str)] = &[
    ("seed", "Seed"),
    ("angel", "Angel"),
    ("grant", "Grant"),
    ("debt", "Debt Financing"),
    ("convertible", "Convertible Note"),
    ("ipo", "Initial Coin Offering"),
];

static PATTERNS: OnceLock<Vec<SearchPattern>> = OnceLock::new();

#[allow(clippy::expect_used)]
fn rule(
    kind: PatternKind,
    pattern: &str,
    reject_after_letter: bool,
    remap: &'static [(&'static str, &'static str)],
) -> SearchPattern {
    SearchPattern {
        kind,
        regex: Regex::new(pattern).expect("Static regex pattern is guaranteed to be valid"),
        reject_after_letter,
        remap,
    }
}

/// The rule table, compiled once
pub fn patterns() -> &'static [SearchPattern] {
    PATTERNS.get_or_init(|| {
        vec![
            rule(
                PatternKind::FundingAmount,
                r"(?i)\$?(\d+(?:\.\d+)?)([kmb])[+-]?",
                true,
                &[],
            ),
            rule(
                PatternKind::GrowthStage,
                r"(?i)\b(early|seed|growing|late|exit)(?:\s+stage)?\b",
                false,
                &[],
            ),
            rule(
                PatternKind::CustomerFocus,
                r"(?i)\b(b2b|b2c|business|consumer)\b",
                false,
                CUSTOMER_FOCUS_REMAP,
            ),
            rule(
                PatternKind::FundingType,
                r"(?i)\b(series [a-z]|seed|angel|grant|debt|convertible|ipo)\b",
                false,
                FUNDING_TYPE_REMAP,
            ),
            rule(
                PatternKind::Rank,
                r"(?i)(rank|position|top)\s*(\d+)",
                false,
                &[],
            ),
        ]
    })
}

impl SearchPattern {
    /// All matches in `haystack`, left to right.
    ///
    /// With `reject_after_letter`, a candidate whose start follows an ASCII
    /// letter is skipped and the search resumes one character later, giving
    /// the same leftmost matches as a `(?<![a-zA-Z])` look-behind.
    pub fn captures<'h>(&self, haystack: &'h str) -> Vec<Captures<'h>> {
        if !self.reject_after_letter {
            return self.regex.captures_iter(haystack).collect();
        }

        let mut found = Vec::new();
        let mut start = 0;
        while start <= haystack.len() {
            let Some(caps) = self.regex.captures_at(haystack, start) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            if preceded_by_letter(haystack, whole.start()) {
                start = next_char_boundary(haystack, whole.start());
                continue;
            }

            start = if whole.end() > whole.start() {
                whole.end()
            } else {
                next_char_boundary(haystack, whole.start())
            };
            found.push(caps);
        }
        found
    }

    /// Canonical value for a lower-case token, if the table remaps it
    pub fn remapped(&self, token: &str) -> Option<&'static str> {
        self.remap
            .iter()
            .find(|(from, _)| *from == token)
            .map(|(_, to)| *to)
    }
}

fn preceded_by_letter(haystack: &str, pos: usize) -> bool {
    haystack[..pos]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphabetic())
}

fn next_char_boundary(haystack: &str, pos: usize) -> usize {
    pos + haystack[pos..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(kind: PatternKind) -> &'static SearchPattern {
        patterns().iter().find(|p| p.kind == kind).unwrap()
    }

    fn matched(kind: PatternKind, text: &str) -> Vec<String> {
        pattern(kind)
            .captures(text)
            .iter()
            .map(|c| c[0].to_string())
            .collect()
    }

    #[test]
    fn test_rule_order() {
        let kinds: Vec<PatternKind> = patterns().iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PatternKind::FundingAmount,
                PatternKind::GrowthStage,
                PatternKind::CustomerFocus,
                PatternKind::FundingType,
                PatternKind::Rank,
            ]
        );
    }

    #[test]
    fn test_funding_amount_forms() {
        assert_eq!(matched(PatternKind::FundingAmount, "$5M+"), vec!["$5M+"]);
        assert_eq!(matched(PatternKind::FundingAmount, "1.5b-"), vec!["1.5b-"]);
        assert_eq!(
            matched(PatternKind::FundingAmount, "500k and 2m"),
            vec!["500k", "2m"]
        );
        assert!(matched(PatternKind::FundingAmount, "50 people").is_empty());
    }

    #[test]
    fn test_funding_amount_not_after_letter() {
        assert!(matched(PatternKind::FundingAmount, "B2B").is_empty());
        assert!(matched(PatternKind::FundingAmount, "b2b saas").is_empty());
        // Skipping the rejected start still finds the shorter match after it
        assert_eq!(matched(PatternKind::FundingAmount, "x12m"), vec!["2m"]);
        assert_eq!(matched(PatternKind::FundingAmount, "a$5m"), vec!["5m"]);
    }

    #[test]
    fn test_funding_amount_handles_multibyte_neighbors() {
        assert_eq!(matched(PatternKind::FundingAmount, "é5m €2k"), vec!["5m", "2k"]);
    }

    #[test]
    fn test_growth_stage_word_boundaries() {
        assert_eq!(
            matched(PatternKind::GrowthStage, "Early Stage startups"),
            vec!["Early Stage"]
        );
        assert_eq!(matched(PatternKind::GrowthStage, "late"), vec!["late"]);
        assert!(matched(PatternKind::GrowthStage, "earlybird lately").is_empty());
    }

    #[test]
    fn test_customer_focus_word_boundaries() {
        assert!(matched(PatternKind::CustomerFocus, "B2B2C companies").is_empty());
        assert_eq!(
            matched(PatternKind::CustomerFocus, "consumer B2C"),
            vec!["consumer", "B2C"]
        );
    }

    #[test]
    fn test_funding_type_forms() {
        assert_eq!(
            matched(PatternKind::FundingType, "Series B debt"),
            vec!["Series B", "debt"]
        );
        assert!(matched(PatternKind::FundingType, "seriesa debts").is_empty());
    }

    #[test]
    fn test_rank_forms() {
        assert_eq!(matched(PatternKind::Rank, "top 100"), vec!["top 100"]);
        assert_eq!(matched(PatternKind::Rank, "rank5"), vec!["rank5"]);
        assert!(matched(PatternKind::Rank, "top companies").is_empty());
    }

    #[test]
    fn test_remap_tables() {
        let focus = pattern(PatternKind::CustomerFocus);
        assert_eq!(focus.remapped("business"), Some("b2b"));
        assert_eq!(focus.remapped("b2b"), None);

        let funding = pattern(PatternKind::FundingType);
        assert_eq!(funding.remapped("ipo"), Some("Initial Coin Offering"));
        assert_eq!(funding.remapped("debt"), Some("Debt Financing"));
    }
}
