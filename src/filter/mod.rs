//! Search filtering over the loaded weeks
//!
//! The query is split on whitespace into lowercase terms. An entry is kept
//! when every term is a substring of its start date, end date or the
//! decimal text of its total hours. Hours are matched as text, never as
//! numbers: `5` matches 5, 15 and 0.5 alike.

use crate::models::WeekEntry;

/// Lowercased terms of a search query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerms {
    terms: Vec<String>,
}

impl SearchTerms {
    /// Split a raw query into lowercase terms
    pub fn parse(query: &str) -> Self {
        Self {
            terms: query.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    /// True when the query had no terms at all
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Check whether `entry` satisfies every term
    pub fn matches(&self, entry: &WeekEntry) -> bool {
        let start = entry.start_date.to_lowercase();
        let end = entry.end_date.to_lowercase();
        let hours = entry.hours_text();

        self.terms.iter().all(|term| {
            start.contains(term.as_str())
                || end.contains(term.as_str())
                || hours.as_deref().is_some_and(|h| h.contains(term.as_str()))
        })
    }
}

/// Derive the visible rows for `query`.
///
/// Blank queries return the list unchanged. Otherwise the matching entries
/// are returned in their original order.
pub fn compute_filtered_view(entries: &[WeekEntry], query: &str) -> Vec<WeekEntry> {
    let terms = SearchTerms::parse(query);
    if terms.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|entry| terms.matches(entry))
        .cloned()
        .collect()
}
