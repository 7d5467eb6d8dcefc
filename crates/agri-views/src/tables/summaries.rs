use super::SummaryTable;
use crate::stats::aquaculture::AquacultureSummary;
use crate::stats::crops::CropsSummary;
use crate::stats::demographics::DemographicsSummary;
use crate::stats::livestock::LivestockSummary;
use crate::stats::round_half_up;

const FARMERS: &str = "Number of Farmers";
const COUNT: &str = "Count";

impl DemographicsSummary {
    pub fn tables(&self) -> Vec<SummaryTable> {
        let mut tables = vec![
            SummaryTable::from_counts("Farmers by Gender", "Gender", FARMERS, &self.by_gender),
            SummaryTable::from_counts("Farmers by Age Group", "Age Group", FARMERS, &self.by_age_group),
            SummaryTable::from_counts("Farmers by County", "County", FARMERS, &self.by_region),
            SummaryTable::from_counts(
                "Highest Level of Formal Education",
                "Education Level",
                FARMERS,
                &self.by_education,
            ),
            SummaryTable::from_counts(
                "Formal Training in Agriculture",
                "Training",
                FARMERS,
                &self.by_training,
            ),
        ];
        // Age buckets are always present; drop their zero rows with no farmers
        if self.total_farmers == 0 {
            tables.iter_mut().for_each(|table| table.rows.clear());
        }
        tables
    }
}

impl CropsSummary {
    pub fn tables(&self) -> Vec<SummaryTable> {
        let mut summary = SummaryTable::new(
            "Crops Summary Table",
            &["Crop Name", "Total Records", "Total Acreage", "Average Acreage"],
        );
        for row in &self.rows {
            summary.push_row(vec![
                row.crop_name.clone(),
                row.total_records.to_string(),
                round_half_up(row.total_acreage).to_string(),
                row.average_acreage.to_string(),
            ]);
        }

        let mut tables = vec![
            summary,
            SummaryTable::from_counts("Water Source", "Water Source", COUNT, &self.by_water_source),
            SummaryTable::from_counts(
                "Production System",
                "Production System",
                COUNT,
                &self.by_production_system,
            ),
            SummaryTable::from_counts("Purpose", "Purpose", COUNT, &self.by_purpose),
            SummaryTable::from_counts(
                "Use of Certified Seeds",
                "Certified Seeds",
                COUNT,
                &self.by_certified_seeds,
            ),
        ];
        // Yes/No rows are always present; drop them when nothing was planted
        if self.total_records == 0 {
            tables.iter_mut().for_each(|table| table.rows.clear());
        }
        tables
    }
}

impl LivestockSummary {
    pub fn tables(&self) -> Vec<SummaryTable> {
        let mut summary = SummaryTable::new(
            "Livestock Summary Table",
            &[
                "Livestock Type",
                "Sub Category",
                "Total Records",
                "Total Livestock",
                "Average per Farmer",
            ],
        );
        for row in &self.rows {
            summary.push_row(vec![
                row.species.clone(),
                row.sub_category.clone(),
                row.total_records.to_string(),
                row.total_head.to_string(),
                row.average_head.to_string(),
            ]);
        }

        let mut ages = SummaryTable::new("Livestock Age Analysis", &["Age Group", "Total Livestock"]);
        for group in &self.head_by_age_group {
            ages.push_row(vec![group.label.clone(), group.total.to_string()]);
        }

        vec![
            summary,
            SummaryTable::from_counts(
                "Livestock Production System",
                "Production System",
                COUNT,
                &self.by_production_system,
            ),
            ages,
        ]
    }
}

impl AquacultureSummary {
    pub fn tables(&self) -> Vec<SummaryTable> {
        let mut summary = SummaryTable::new(
            "Aquaculture Summary Table",
            &[
                "Aquaculture Species",
                "Total Records",
                "Total Fingerlings",
                "Average Fingerlings",
            ],
        );
        for row in &self.rows {
            summary.push_row(vec![
                row.species.clone(),
                row.total_records.to_string(),
                row.total_fingerlings.to_string(),
                row.average_fingerlings.to_string(),
            ]);
        }

        vec![
            summary,
            SummaryTable::from_counts(
                "Type of Production System",
                "Production System",
                COUNT,
                &self.by_production_system,
            ),
            SummaryTable::from_counts(
                "Aquaculture Species Category",
                "Species Category",
                COUNT,
                &self.by_species_category,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use agri_core::LivestockHolding;

    use super::*;

    #[test]
    fn test_empty_summaries_give_empty_tables() {
        let tables = DemographicsSummary::summarize(&[], 2024)
            .tables()
            .into_iter()
            .chain(CropsSummary::summarize(&[]).tables())
            .chain(LivestockSummary::summarize(&[]).tables())
            .chain(AquacultureSummary::summarize(&[]).tables());
        for table in tables {
            assert!(table.is_empty(), "{} has rows", table.title);
            assert!(!table.headers.is_empty());
        }
    }

    #[test]
    fn test_livestock_summary_table() {
        let holdings: Vec<LivestockHolding> = [(2, 3), (1, 1)]
            .iter()
            .map(|(male, female)| LivestockHolding {
                id: 1,
                farmer_id: 1,
                species: "Cattle".to_string(),
                sub_category: "Dairy".to_string(),
                region: "Nakuru".to_string(),
                subregion: "Gilgil".to_string(),
                locality: "Ward 1".to_string(),
                male_count: *male,
                female_count: *female,
                production_system: "Zero-grazing".to_string(),
                age_group: "Adult".to_string(),
            })
            .collect();
        let refs: Vec<&LivestockHolding> = holdings.iter().collect();
        let tables = LivestockSummary::summarize(&refs).tables();

        assert_eq!(tables[0].title, "Livestock Summary Table");
        assert_eq!(tables[0].rows, vec![vec!["Cattle", "Dairy", "2", "7", "4"]]);
        assert_eq!(tables[2].rows, vec![vec!["Adult", "7"]]);
    }
}
