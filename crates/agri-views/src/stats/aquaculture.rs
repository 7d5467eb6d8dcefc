//! Aquaculture operations grouped by species

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use agri_core::AquacultureOperation;

use super::{count_by, rounded_average, sort_desc, CategoryCount};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AquacultureSummaryRow {
    pub species: String,
    pub total_records: usize,
    pub total_fingerlings: u64,
    pub average_fingerlings: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AquacultureSummary {
    pub total_records: usize,
    pub total_fingerlings: u64,

    /// Sorted by total fingerlings, largest first
    pub rows: Vec<AquacultureSummaryRow>,

    /// Sorted by count, largest first
    pub by_production_system: Vec<CategoryCount>,
    pub by_species_category: Vec<CategoryCount>,
}

impl AquacultureSummary {
    pub fn summarize(operations: &[&AquacultureOperation]) -> Self {
        let mut groups: IndexMap<&str, (usize, u64)> = IndexMap::new();
        for operation in operations {
            let entry = groups.entry(operation.species.as_str()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += operation.fingerlings;
        }

        let mut rows: Vec<AquacultureSummaryRow> = groups
            .into_iter()
            .map(|(species, (count, fingerlings))| AquacultureSummaryRow {
                species: species.to_string(),
                total_records: count,
                total_fingerlings: fingerlings,
                average_fingerlings: rounded_average(fingerlings as f64, count),
            })
            .collect();
        rows.sort_by(|a, b| b.total_fingerlings.cmp(&a.total_fingerlings));

        Self {
            total_records: operations.len(),
            total_fingerlings: operations.iter().map(|o| o.fingerlings).sum(),
            rows,
            by_production_system: sort_desc(count_by(operations, |o| {
                o.production_system.as_str()
            })),
            by_species_category: count_by(operations, |o| o.species_category.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation(species: &str, category: &str, system: &str, fingerlings: u64) -> AquacultureOperation {
        AquacultureOperation {
            id: 1,
            farmer_id: 1,
            species: species.to_string(),
            species_category: category.to_string(),
            region: "Mombasa".to_string(),
            subregion: "Likoni".to_string(),
            locality: "Ward 1".to_string(),
            production_system: system.to_string(),
            fingerlings,
        }
    }

    #[test]
    fn test_groups_by_species() {
        let operations = vec![
            operation("Tilapia", "Freshwater", "Pond", 300),
            operation("Trout", "Freshwater", "Cage", 900),
            operation("Tilapia", "Freshwater", "Pond", 401),
            operation("Salmon", "Marine", "Tank", 100),
        ];
        let refs: Vec<&AquacultureOperation> = operations.iter().collect();
        let summary = AquacultureSummary::summarize(&refs);

        let species: Vec<&str> = summary.rows.iter().map(|r| r.species.as_str()).collect();
        assert_eq!(species, vec!["Trout", "Tilapia", "Salmon"]);
        assert_eq!(summary.rows[1].total_fingerlings, 701);
        assert_eq!(summary.rows[1].average_fingerlings, 351);
        assert_eq!(summary.total_fingerlings, 1701);
        assert_eq!(summary.by_production_system[0], CategoryCount::new("Pond", 2));
        assert_eq!(
            summary.by_species_category,
            vec![CategoryCount::new("Freshwater", 3), CategoryCount::new("Marine", 1)]
        );
        let conserved: usize = summary.rows.iter().map(|r| r.total_records).sum();
        assert_eq!(conserved, operations.len());
    }

    #[test]
    fn test_empty_set() {
        let summary = AquacultureSummary::summarize(&[]);
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.total_fingerlings, 0);
        assert!(summary.rows.is_empty());
        assert!(summary.by_species_category.is_empty());
    }
}
