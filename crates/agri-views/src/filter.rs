use agri_core::{FilterSelection, Located};

/// Records of one domain that match the domain's selection
///
/// This is the single predicate every table, chart and statistic of a domain
/// is built from.
pub fn filter_records<'a, R: Located>(records: &'a [R], selection: &FilterSelection) -> Vec<&'a R> {
    records.iter().filter(|record| selection.matches(*record)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_core::{FilterLevel, FilterSelection, ALL};

    #[derive(Debug, PartialEq)]
    struct Place(&'static str, &'static str, &'static str);

    impl Located for Place {
        fn region(&self) -> &str {
            self.0
        }

        fn subregion(&self) -> &str {
            self.1
        }

        fn locality(&self) -> &str {
            self.2
        }
    }

    fn places() -> Vec<Place> {
        vec![
            Place("Nairobi", "Westlands", "Parklands"),
            Place("Nairobi", "Westlands", "Kangemi"),
            Place("Nairobi", "Embakasi", "Pipeline"),
            Place("Kiambu", "Thika", "Ward 1"),
        ]
    }

    #[test]
    fn test_all_selection_keeps_everything() {
        let records = places();
        let filtered = filter_records(&records, &FilterSelection::default());
        assert_eq!(filtered.len(), records.len());
    }

    #[test]
    fn test_each_level_narrows() {
        let records = places();
        let selection = FilterSelection::new("Nairobi", "Westlands", "Kangemi");

        let full = filter_records(&records, &selection).len();
        assert_eq!(full, 1);

        for level in [FilterLevel::Region, FilterLevel::Subregion, FilterLevel::Locality] {
            let loosened = filter_records(&records, &selection.loosened(level)).len();
            assert!(full <= loosened);
        }
        assert_eq!(
            filter_records(&records, &FilterSelection::new("Nairobi", "Westlands", ALL)).len(),
            2
        );
        assert_eq!(filter_records(&records, &FilterSelection::region("Nairobi")).len(), 3);
    }

    #[test]
    fn test_unmatched_region_is_empty() {
        let records = places();
        assert!(filter_records(&records, &FilterSelection::region("Turkana")).is_empty());
    }

    #[test]
    fn test_inconsistent_selection_is_applied_literally() {
        let records = places();
        let selection = FilterSelection::new(ALL, "Thika", ALL);
        assert_eq!(
            filter_records(&records, &selection),
            vec![&Place("Kiambu", "Thika", "Ward 1")]
        );
    }
}
