//! Headline statistics shown next to each domain's tables

use serde::{Deserialize, Serialize};

use crate::stats::aquaculture::AquacultureSummary;
use crate::stats::crops::CropsSummary;
use crate::stats::demographics::DemographicsSummary;
use crate::stats::livestock::LivestockSummary;
use crate::stats::{
    format_percent, format_thousands, format_whole_percent, percentage, round_half_up,
    CategoryCount, NOT_AVAILABLE,
};

/// A labelled, pre-formatted statistic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInsight {
    pub label: String,
    pub value: String,
}

impl KeyInsight {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

fn or_not_available(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn join_counts(counts: &[CategoryCount]) -> Option<String> {
    if counts.is_empty() {
        return None;
    }
    Some(
        counts
            .iter()
            .map(|c| format!("{}: {}", c.label, c.count))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

impl DemographicsSummary {
    pub fn insights(&self) -> Vec<KeyInsight> {
        vec![
            KeyInsight::new("Total Farmers", self.total_farmers.to_string()),
            KeyInsight::new(
                "Crop Farmers",
                format!(
                    "{} ({} of total)",
                    self.crop_farmers,
                    format_percent(self.crop_farmer_pct)
                ),
            ),
            KeyInsight::new(
                "Livestock Farmers",
                format!(
                    "{} ({} of total)",
                    self.livestock_farmers,
                    format_percent(self.livestock_farmer_pct)
                ),
            ),
            KeyInsight::new("Farming Households", self.farming_households.to_string()),
            KeyInsight::new(
                "Most Active County",
                or_not_available(self.by_region.first().map(|c| c.label.clone())),
            ),
            KeyInsight::new(
                "Gender Distribution",
                or_not_available(join_counts(&self.by_gender)),
            ),
        ]
    }
}

impl CropsSummary {
    pub fn insights(&self) -> Vec<KeyInsight> {
        vec![
            KeyInsight::new("Total Crops Recorded", self.total_records.to_string()),
            KeyInsight::new(
                "Most Common Crop",
                or_not_available(self.leading_crop().map(|row| {
                    format!("{} with {} records", row.crop_name, row.total_records)
                })),
            ),
            KeyInsight::new(
                "Total Acreage Under Cultivation",
                format!("{} acres", round_half_up(self.total_acreage)),
            ),
            KeyInsight::new(
                "Predominant Water Source",
                or_not_available(self.predominant_water_source().map(|c| c.label.clone())),
            ),
            KeyInsight::new(
                "Certified Seeds Usage",
                or_not_available(self.certified_seed_pct.map(|pct| {
                    format!("{} of farmers", format_whole_percent(Some(pct)))
                })),
            ),
        ]
    }
}

impl LivestockSummary {
    pub fn insights(&self) -> Vec<KeyInsight> {
        vec![
            KeyInsight::new("Total Livestock", format_thousands(self.total_head)),
            KeyInsight::new("Male Livestock", format_thousands(self.male_head)),
            KeyInsight::new("Female Livestock", format_thousands(self.female_head)),
            KeyInsight::new(
                "Most Common Livestock",
                or_not_available(
                    self.rows
                        .first()
                        .map(|row| format!("{} ({})", row.species, row.sub_category)),
                ),
            ),
            KeyInsight::new(
                "Predominant Production System",
                or_not_available(self.by_production_system.first().map(|c| c.label.clone())),
            ),
        ]
    }
}

impl AquacultureSummary {
    pub fn insights(&self) -> Vec<KeyInsight> {
        let categories = if self.by_species_category.is_empty() {
            None
        } else {
            Some(
                self.by_species_category
                    .iter()
                    .map(|c| {
                        format!(
                            "{}: {} ({})",
                            c.label,
                            c.count,
                            format_whole_percent(percentage(c.count, self.total_records))
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        };

        vec![
            KeyInsight::new("Total Aquaculture Operations", self.total_records.to_string()),
            KeyInsight::new(
                "Most Common Species",
                or_not_available(self.rows.first().map(|row| row.species.clone())),
            ),
            KeyInsight::new(
                "Total Estimated Fingerlings",
                format_thousands(self.total_fingerlings),
            ),
            KeyInsight::new(
                "Predominant Production System",
                or_not_available(self.by_production_system.first().map(|c| c.label.clone())),
            ),
            KeyInsight::new("Species Category Distribution", or_not_available(categories)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_core::{AquacultureOperation, CropPlanting};

    fn value<'a>(insights: &'a [KeyInsight], label: &str) -> &'a str {
        insights
            .iter()
            .find(|i| i.label == label)
            .map(|i| i.value.as_str())
            .unwrap()
    }

    #[test]
    fn test_empty_sets_render_not_available() {
        let demographics = DemographicsSummary::summarize(&[], 2024).insights();
        assert_eq!(value(&demographics, "Crop Farmers"), "0 (N/A of total)");
        assert_eq!(value(&demographics, "Most Active County"), NOT_AVAILABLE);
        assert_eq!(value(&demographics, "Gender Distribution"), NOT_AVAILABLE);

        let crops = CropsSummary::summarize(&[]).insights();
        assert_eq!(value(&crops, "Most Common Crop"), NOT_AVAILABLE);
        assert_eq!(value(&crops, "Certified Seeds Usage"), NOT_AVAILABLE);
        assert_eq!(value(&crops, "Total Acreage Under Cultivation"), "0 acres");

        let livestock = LivestockSummary::summarize(&[]).insights();
        assert_eq!(value(&livestock, "Total Livestock"), "0");
        assert_eq!(value(&livestock, "Most Common Livestock"), NOT_AVAILABLE);

        let aquaculture = AquacultureSummary::summarize(&[]).insights();
        assert_eq!(value(&aquaculture, "Species Category Distribution"), NOT_AVAILABLE);

        for insight in demographics.iter().chain(&crops).chain(&livestock).chain(&aquaculture) {
            assert!(!insight.value.contains("NaN"), "{} rendered NaN", insight.label);
        }
    }

    #[test]
    fn test_crop_insights() {
        let crops: Vec<CropPlanting> = [("Maize", 2.4, true), ("Maize", 4.0, false), ("Beans", 1.0, true)]
            .iter()
            .enumerate()
            .map(|(i, (name, acreage, certified))| CropPlanting {
                id: i as u64,
                farmer_id: 1,
                crop_name: name.to_string(),
                acreage: *acreage,
                region: "Kiambu".to_string(),
                subregion: "Thika".to_string(),
                locality: "Ward 1".to_string(),
                water_source: "Irrigated".to_string(),
                production_system: "Commercial".to_string(),
                purpose: "Commercial".to_string(),
                certified_seeds: *certified,
            })
            .collect();
        let refs: Vec<&CropPlanting> = crops.iter().collect();
        let insights = CropsSummary::summarize(&refs).insights();

        assert_eq!(value(&insights, "Most Common Crop"), "Maize with 2 records");
        assert_eq!(value(&insights, "Total Acreage Under Cultivation"), "7 acres");
        assert_eq!(value(&insights, "Predominant Water Source"), "Irrigated");
        assert_eq!(value(&insights, "Certified Seeds Usage"), "67% of farmers");
    }

    #[test]
    fn test_aquaculture_category_shares() {
        let operations: Vec<AquacultureOperation> = ["Freshwater", "Freshwater", "Marine"]
            .iter()
            .map(|category| AquacultureOperation {
                id: 1,
                farmer_id: 1,
                species: "Tilapia".to_string(),
                species_category: category.to_string(),
                region: "Kisumu".to_string(),
                subregion: "Nyando".to_string(),
                locality: "Ward 1".to_string(),
                production_system: "Pond".to_string(),
                fingerlings: 1000,
            })
            .collect();
        let refs: Vec<&AquacultureOperation> = operations.iter().collect();
        let insights = AquacultureSummary::summarize(&refs).insights();

        assert_eq!(
            value(&insights, "Species Category Distribution"),
            "Freshwater: 2 (67%), Marine: 1 (33%)"
        );
        assert_eq!(value(&insights, "Total Estimated Fingerlings"), "3,000");
        assert_eq!(value(&insights, "Most Common Species"), "Tilapia");
    }
}
