//! Livestock holdings grouped by species and sub-category

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use agri_core::LivestockHolding;

use super::{count_by, rounded_average, sort_desc, CategoryCount, CategoryTotal};

/// Age groups in display order; any other value follows in first-seen order
pub const AGE_ORDER: [&str; 3] = ["Young", "Adult", "Old"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivestockSummaryRow {
    pub species: String,
    pub sub_category: String,
    pub total_records: usize,
    pub total_head: u64,

    /// Rounded head count per holding
    pub average_head: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivestockSummary {
    pub total_records: usize,
    pub total_head: u64,
    pub male_head: u64,
    pub female_head: u64,

    /// Sorted by total head, largest first
    pub rows: Vec<LivestockSummaryRow>,

    /// Sorted by count, largest first
    pub by_production_system: Vec<CategoryCount>,

    /// Head count per age group, see [`AGE_ORDER`]
    pub head_by_age_group: Vec<CategoryTotal>,
}

impl LivestockSummary {
    pub fn summarize(holdings: &[&LivestockHolding]) -> Self {
        let mut groups: IndexMap<(&str, &str), (usize, u64)> = IndexMap::new();
        let mut ages: IndexMap<&str, u64> = IndexMap::new();
        for holding in holdings {
            let key = (holding.species.as_str(), holding.sub_category.as_str());
            let entry = groups.entry(key).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += holding.total_head();

            *ages.entry(holding.age_group.as_str()).or_insert(0) += holding.total_head();
        }

        let mut rows: Vec<LivestockSummaryRow> = groups
            .into_iter()
            .map(|((species, sub_category), (count, head))| LivestockSummaryRow {
                species: species.to_string(),
                sub_category: sub_category.to_string(),
                total_records: count,
                total_head: head,
                average_head: rounded_average(head as f64, count),
            })
            .collect();
        rows.sort_by(|a, b| b.total_head.cmp(&a.total_head));

        let mut head_by_age_group: Vec<CategoryTotal> = ages
            .into_iter()
            .map(|(label, total)| CategoryTotal {
                label: label.to_string(),
                total,
            })
            .collect();
        head_by_age_group.sort_by_key(|group| {
            AGE_ORDER
                .iter()
                .position(|age| *age == group.label)
                .unwrap_or(AGE_ORDER.len())
        });

        let male_head: u64 = holdings.iter().map(|h| u64::from(h.male_count)).sum();
        let female_head: u64 = holdings.iter().map(|h| u64::from(h.female_count)).sum();

        Self {
            total_records: holdings.len(),
            total_head: male_head + female_head,
            male_head,
            female_head,
            rows,
            by_production_system: sort_desc(count_by(holdings, |h| h.production_system.as_str())),
            head_by_age_group,
        }
    }
}
