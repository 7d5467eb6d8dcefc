//! Grouping and summary helpers shared by the domain summarizers
//!
//! Empty populations never produce NaN: averages of empty groups are `0` and
//! percentages of an empty base are `None`, rendered as [`NOT_AVAILABLE`].

pub mod aquaculture;
pub mod crops;
pub mod demographics;
pub mod livestock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder shown where a statistic has no population to describe
pub const NOT_AVAILABLE: &str = "N/A";

/// Number of records carrying one categorical value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// A summed quantity for one categorical value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub label: String,
    pub total: u64,
}

/// Count records by a categorical key, in first-seen order
pub fn count_by<'a, R: 'a, K>(records: &[&'a R], key: K) -> Vec<CategoryCount>
where
    K: Fn(&'a R) -> &'a str,
{
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for record in records.iter().copied() {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| CategoryCount::new(label, count))
        .collect()
}

/// Sort counts largest first; ties keep their first-seen order
pub fn sort_desc(mut counts: Vec<CategoryCount>) -> Vec<CategoryCount> {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The most frequent category, first seen winning ties
pub fn most_frequent(counts: &[CategoryCount]) -> Option<&CategoryCount> {
    counts
        .iter()
        .fold(None, |best: Option<&CategoryCount>, candidate| match best {
            Some(current) if current.count >= candidate.count => Some(current),
            _ => Some(candidate),
        })
}

/// Round to the nearest integer, halves rounding up
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounded mean of `total` over `count` records, `0` for an empty group
pub fn rounded_average(total: f64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    round_half_up(total / count as f64).max(0.0) as u64
}

/// `part` as a percentage of `whole`, `None` when `whole` is zero
pub fn percentage(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64 * 100.0)
    }
}

/// Percentage with one decimal place, or `N/A`
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{:.1}%", pct),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Percentage rounded to a whole number, or `N/A`
pub fn format_whole_percent(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{}%", round_half_up(pct)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Integer with comma thousands separators
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
