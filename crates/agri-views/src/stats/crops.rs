//! Crop plantings grouped by crop

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use agri_core::CropPlanting;

use super::{count_by, most_frequent, percentage, rounded_average, CategoryCount};

/// One crop's aggregate over the filtered plantings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSummaryRow {
    pub crop_name: String,
    pub total_records: usize,
    pub total_acreage: f64,
    pub average_acreage: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropsSummary {
    pub total_records: usize,
    pub total_acreage: f64,

    /// Sorted by total acreage, largest first
    pub rows: Vec<CropSummaryRow>,

    pub by_water_source: Vec<CategoryCount>,
    pub by_production_system: Vec<CategoryCount>,
    pub by_purpose: Vec<CategoryCount>,

    /// Always `[Yes, No]`, zero counts included
    pub by_certified_seeds: Vec<CategoryCount>,
    pub certified_seed_pct: Option<f64>,
}

impl CropsSummary {
    pub fn summarize(crops: &[&CropPlanting]) -> Self {
        let mut groups: IndexMap<&str, (usize, f64)> = IndexMap::new();
        for crop in crops {
            let entry = groups.entry(crop.crop_name.as_str()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += crop.acreage;
        }

        let mut rows: Vec<CropSummaryRow> = groups
            .into_iter()
            .map(|(name, (count, acreage))| CropSummaryRow {
                crop_name: name.to_string(),
                total_records: count,
                total_acreage: acreage,
                average_acreage: rounded_average(acreage, count),
            })
            .collect();
        rows.sort_by(|a, b| b.total_acreage.total_cmp(&a.total_acreage));

        let certified = crops.iter().filter(|c| c.certified_seeds).count();

        Self {
            total_records: crops.len(),
            total_acreage: crops.iter().map(|c| c.acreage).sum(),
            rows,
            by_water_source: count_by(crops, |c| c.water_source.as_str()),
            by_production_system: count_by(crops, |c| c.production_system.as_str()),
            by_purpose: count_by(crops, |c| c.purpose.as_str()),
            by_certified_seeds: vec![
                CategoryCount::new("Yes", certified),
                CategoryCount::new("No", crops.len() - certified),
            ],
            certified_seed_pct: percentage(certified, crops.len()),
        }
    }

    /// Crop with the most acreage
    pub fn leading_crop(&self) -> Option<&CropSummaryRow> {
        self.rows.first()
    }

    pub fn predominant_water_source(&self) -> Option<&CategoryCount> {
        most_frequent(&self.by_water_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planting(id: u64, crop: &str, acreage: f64, certified: bool) -> CropPlanting {
        CropPlanting {
            id,
            farmer_id: 1,
            crop_name: crop.to_string(),
            acreage,
            region: "Nakuru".to_string(),
            subregion: "Molo".to_string(),
            locality: "Ward 1".to_string(),
            water_source: if id % 2 == 0 { "Irrigated" } else { "Rain-fed" }.to_string(),
            production_system: "Small-scale".to_string(),
            purpose: "Both".to_string(),
            certified_seeds: certified,
        }
    }

    #[test]
    fn test_groups_by_crop_sorted_by_acreage() {
        let crops = vec![
            planting(1, "Maize", 2.0, true),
            planting(2, "Maize", 4.0, false),
            planting(3, "Beans", 1.0, true),
        ];
        let refs: Vec<&CropPlanting> = crops.iter().collect();
        let summary = CropsSummary::summarize(&refs);

        assert_eq!(
            summary.rows,
            vec![
                CropSummaryRow {
                    crop_name: "Maize".to_string(),
                    total_records: 2,
                    total_acreage: 6.0,
                    average_acreage: 3,
                },
                CropSummaryRow {
                    crop_name: "Beans".to_string(),
                    total_records: 1,
                    total_acreage: 1.0,
                    average_acreage: 1,
                },
            ]
        );
        let conserved: usize = summary.rows.iter().map(|r| r.total_records).sum();
        assert_eq!(conserved, crops.len());
    }

    #[test]
    fn test_smaller_first_crop_sorts_after() {
        let crops = vec![
            planting(1, "Beans", 1.0, false),
            planting(2, "Maize", 5.0, false),
        ];
        let refs: Vec<&CropPlanting> = crops.iter().collect();
        let summary = CropsSummary::summarize(&refs);
        assert_eq!(summary.leading_crop().map(|r| r.crop_name.as_str()), Some("Maize"));
    }

    #[test]
    fn test_breakdowns() {
        let crops = vec![
            planting(1, "Maize", 2.0, true),
            planting(2, "Maize", 4.0, false),
            planting(3, "Beans", 1.0, true),
            planting(4, "Rice", 1.5, true),
        ];
        let refs: Vec<&CropPlanting> = crops.iter().collect();
        let summary = CropsSummary::summarize(&refs);

        assert_eq!(summary.total_acreage, 8.5);
        assert_eq!(
            summary.by_certified_seeds,
            vec![CategoryCount::new("Yes", 3), CategoryCount::new("No", 1)]
        );
        assert_eq!(summary.certified_seed_pct, Some(75.0));
        assert_eq!(
            summary.predominant_water_source().map(|c| c.label.as_str()),
            Some("Rain-fed")
        );
        assert_eq!(summary.by_purpose, vec![CategoryCount::new("Both", 4)]);

        let uncertified = vec![planting(5, "Maize", 1.0, false), planting(6, "Beans", 2.0, false)];
        let refs: Vec<&CropPlanting> = uncertified.iter().collect();
        let summary = CropsSummary::summarize(&refs);
        assert_eq!(
            summary.by_certified_seeds,
            vec![CategoryCount::new("Yes", 0), CategoryCount::new("No", 2)]
        );
        assert_eq!(summary.certified_seed_pct, Some(0.0));
    }

    #[test]
    fn test_empty_set() {
        let summary = CropsSummary::summarize(&[]);
        assert!(summary.rows.is_empty());
        assert_eq!(summary.total_acreage, 0.0);
        assert_eq!(summary.certified_seed_pct, None);
        assert_eq!(
            summary.by_certified_seeds,
            vec![CategoryCount::new("Yes", 0), CategoryCount::new("No", 0)]
        );
        assert!(summary.leading_crop().is_none());
        assert!(summary.predominant_water_source().is_none());
    }
}
