use std::sync::Arc;

use chrono::Datelike;

use agri_core::{
    AquacultureOperation, CropPlanting, DashboardState, Domain, FilterLevel, FilterOptions,
    FilterSelection, LivestockHolding, LoadStatus, LoadedStore, Person, RecordStore,
};

use crate::cache::{CacheKey, SummaryCache};
use crate::filter::filter_records;
use crate::insights::KeyInsight;
use crate::stats::aquaculture::AquacultureSummary;
use crate::stats::crops::CropsSummary;
use crate::stats::demographics::DemographicsSummary;
use crate::stats::livestock::LivestockSummary;
use crate::tables::SummaryTable;
use crate::ViewError;

const DEFAULT_CACHE_ENTRIES: usize = 64;

/// Views of one dashboard session
///
/// Reads are pull-based: after any filter change the next summary request
/// recomputes from the new selection (or returns the memoized result for a
/// selection seen before on the same load).
pub struct Dashboard {
    state: Arc<DashboardState>,
    current_year: i32,
    demographics: SummaryCache<DemographicsSummary>,
    crops: SummaryCache<CropsSummary>,
    livestock: SummaryCache<LivestockSummary>,
    aquaculture: SummaryCache<AquacultureSummary>,
}

impl Dashboard {
    pub fn new(state: Arc<DashboardState>) -> Self {
        Self::with_cache_entries(state, DEFAULT_CACHE_ENTRIES)
    }

    pub fn with_cache_entries(state: Arc<DashboardState>, cache_entries: usize) -> Self {
        Self {
            state,
            current_year: chrono::Local::now().year(),
            demographics: SummaryCache::new(cache_entries),
            crops: SummaryCache::new(cache_entries),
            livestock: SummaryCache::new(cache_entries),
            aquaculture: SummaryCache::new(cache_entries),
        }
    }

    /// Fix the year ages are computed against
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self.demographics.clear();
        self
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn state(&self) -> &Arc<DashboardState> {
        &self.state
    }

    pub fn status(&self) -> LoadStatus {
        self.state.status()
    }

    pub fn set_filter(&self, domain: Domain, level: FilterLevel, value: impl Into<String>) {
        self.state.set_filter(domain, level, value);
    }

    pub fn selection(&self, domain: Domain) -> FilterSelection {
        self.state.selection(domain)
    }

    pub fn options(&self, domain: Domain) -> FilterOptions {
        self.state.options(domain)
    }

    /// The store with its generation, or why no view can be built from it
    fn ready_store(&self) -> Result<LoadedStore, ViewError> {
        match self.state.status() {
            LoadStatus::Loading => Err(ViewError::NotReady),
            LoadStatus::Failed(message) => Err(ViewError::LoadFailed(message)),
            LoadStatus::Ready => Ok(self.state.loaded()),
        }
    }

    /// Records and cache key for a domain, both taken from the same load
    fn ready(&self, domain: Domain) -> Result<(Arc<RecordStore>, CacheKey), ViewError> {
        let LoadedStore { generation, store } = self.ready_store()?;
        Ok((store, CacheKey::new(generation, self.selection(domain))))
    }

    pub fn filtered_people(&self) -> Result<Vec<Person>, ViewError> {
        let store = self.ready_store()?.store;
        let selection = self.selection(Domain::Demographics);
        Ok(filter_records(&store.people, &selection).into_iter().cloned().collect())
    }

    pub fn filtered_crops(&self) -> Result<Vec<CropPlanting>, ViewError> {
        let store = self.ready_store()?.store;
        let selection = self.selection(Domain::Crops);
        Ok(filter_records(&store.crops, &selection).into_iter().cloned().collect())
    }

    pub fn filtered_livestock(&self) -> Result<Vec<LivestockHolding>, ViewError> {
        let store = self.ready_store()?.store;
        let selection = self.selection(Domain::Livestock);
        Ok(filter_records(&store.livestock, &selection).into_iter().cloned().collect())
    }

    pub fn filtered_aquaculture(&self) -> Result<Vec<AquacultureOperation>, ViewError> {
        let store = self.ready_store()?.store;
        let selection = self.selection(Domain::Aquaculture);
        Ok(filter_records(&store.aquaculture, &selection).into_iter().cloned().collect())
    }

    /// Number of records of a domain matching its selection
    pub fn filtered_len(&self, domain: Domain) -> Result<usize, ViewError> {
        let store = self.ready_store()?.store;
        let selection = self.selection(domain);
        Ok(store
            .locations(domain)
            .into_iter()
            .filter(|record| selection.matches(*record))
            .count())
    }

    pub fn demographics(&self) -> Result<Arc<DemographicsSummary>, ViewError> {
        let (store, key) = self.ready(Domain::Demographics)?;
        Ok(self.demographics.get_or_insert_with(key.clone(), || {
            let people = filter_records(&store.people, &key.selection);
            DemographicsSummary::summarize(&people, self.current_year)
        }))
    }

    pub fn crops(&self) -> Result<Arc<CropsSummary>, ViewError> {
        let (store, key) = self.ready(Domain::Crops)?;
        Ok(self.crops.get_or_insert_with(key.clone(), || {
            CropsSummary::summarize(&filter_records(&store.crops, &key.selection))
        }))
    }

    pub fn livestock(&self) -> Result<Arc<LivestockSummary>, ViewError> {
        let (store, key) = self.ready(Domain::Livestock)?;
        Ok(self.livestock.get_or_insert_with(key.clone(), || {
            LivestockSummary::summarize(&filter_records(&store.livestock, &key.selection))
        }))
    }

    pub fn aquaculture(&self) -> Result<Arc<AquacultureSummary>, ViewError> {
        let (store, key) = self.ready(Domain::Aquaculture)?;
        Ok(self.aquaculture.get_or_insert_with(key.clone(), || {
            AquacultureSummary::summarize(&filter_records(&store.aquaculture, &key.selection))
        }))
    }

    /// Headline statistics for a domain
    pub fn insights(&self, domain: Domain) -> Result<Vec<KeyInsight>, ViewError> {
        Ok(match domain {
            Domain::Demographics => self.demographics()?.insights(),
            Domain::Crops => self.crops()?.insights(),
            Domain::Livestock => self.livestock()?.insights(),
            Domain::Aquaculture => self.aquaculture()?.insights(),
        })
    }

    /// Summary tables for a domain
    pub fn tables(&self, domain: Domain) -> Result<Vec<SummaryTable>, ViewError> {
        Ok(match domain {
            Domain::Demographics => self.demographics()?.tables(),
            Domain::Crops => self.crops()?.tables(),
            Domain::Livestock => self.livestock()?.tables(),
            Domain::Aquaculture => self.aquaculture()?.tables(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_core::data::DataSource;
    use agri_core::TrainingStatus;
    use async_trait::async_trait;

    use crate::stats::NOT_AVAILABLE;

    fn person(id: u64, county: &str, subcounty: &str) -> Person {
        Person {
            id,
            name: format!("Farmer {}", id),
            gender: "Female".to_string(),
            year_of_birth: 1980,
            region: county.to_string(),
            subregion: subcounty.to_string(),
            locality: "Ward 1".to_string(),
            crop_production: true,
            livestock_production: id % 2 == 0,
            education: "Secondary".to_string(),
            training: TrainingStatus::No,
        }
    }

    fn crop(id: u64, name: &str, county: &str, acreage: f64) -> CropPlanting {
        CropPlanting {
            id,
            farmer_id: id,
            crop_name: name.to_string(),
            acreage,
            region: county.to_string(),
            subregion: "Central".to_string(),
            locality: "Ward 1".to_string(),
            water_source: "Rain-fed".to_string(),
            production_system: "Subsistence".to_string(),
            purpose: "Subsistence".to_string(),
            certified_seeds: id == 1,
        }
    }

    fn store() -> RecordStore {
        RecordStore::new(
            vec![
                person(1, "Nairobi", "Westlands"),
                person(2, "Nairobi", "Embakasi"),
                person(3, "Kiambu", "Thika"),
            ],
            vec![
                crop(1, "Maize", "Nairobi", 2.0),
                crop(2, "Maize", "Nairobi", 4.0),
                crop(3, "Beans", "Kiambu", 1.0),
            ],
            Vec::new(),
            Vec::new(),
        )
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(DashboardState::with_store(store()))).with_current_year(2024)
    }

    struct BrokenSource;

    #[async_trait]
    impl DataSource for BrokenSource {
        async fn load(&self) -> anyhow::Result<RecordStore> {
            anyhow::bail!("connection refused")
        }

        fn source_name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_not_ready_while_loading() {
        let dashboard = Dashboard::new(Arc::new(DashboardState::new()));
        assert!(matches!(dashboard.crops(), Err(ViewError::NotReady)));
        assert!(matches!(dashboard.filtered_people(), Err(ViewError::NotReady)));
    }

    #[tokio::test]
    async fn test_failed_load_blocks_views() {
        let state = Arc::new(DashboardState::new());
        assert!(state.load(&BrokenSource).await.is_err());

        let dashboard = Dashboard::new(state);
        match dashboard.tables(Domain::Crops) {
            Err(ViewError::LoadFailed(message)) => assert!(message.contains("connection refused")),
            other => panic!("expected load failure, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_crop_scenario_unfiltered() {
        let dashboard = dashboard();
        let crops = dashboard.crops().unwrap();
        let groups: Vec<(&str, usize, u64)> = crops
            .rows
            .iter()
            .map(|r| (r.crop_name.as_str(), r.total_records, r.average_acreage))
            .collect();
        assert_eq!(groups, vec![("Maize", 2, 3), ("Beans", 1, 1)]);
    }

    #[test]
    fn test_region_without_records() {
        let dashboard = dashboard();
        for domain in Domain::ALL {
            dashboard.set_filter(domain, FilterLevel::Region, "Turkana");
            assert_eq!(dashboard.filtered_len(domain).unwrap(), 0);
            for table in dashboard.tables(domain).unwrap() {
                assert!(table.is_empty(), "{} should be empty", table.title);
            }
        }

        assert!(dashboard.filtered_people().unwrap().is_empty());
        assert!(dashboard.filtered_crops().unwrap().is_empty());

        let demographics = dashboard.demographics().unwrap();
        assert_eq!(demographics.crop_farmer_pct, None);
        assert_eq!(demographics.livestock_farmer_pct, None);
        assert_eq!(dashboard.crops().unwrap().certified_seed_pct, None);

        let insights = dashboard.insights(Domain::Crops).unwrap();
        let usage = insights
            .iter()
            .find(|i| i.label == "Certified Seeds Usage")
            .unwrap();
        assert_eq!(usage.value, NOT_AVAILABLE);
    }

    #[test]
    fn test_counts_are_conserved_under_filters() {
        let dashboard = dashboard();
        for region in ["All", "Nairobi", "Kiambu"] {
            dashboard.set_filter(Domain::Crops, FilterLevel::Region, region);
            dashboard.set_filter(Domain::Demographics, FilterLevel::Region, region);

            let crops = dashboard.crops().unwrap();
            let grouped: usize = crops.rows.iter().map(|r| r.total_records).sum();
            assert_eq!(grouped, dashboard.filtered_crops().unwrap().len());

            let demographics = dashboard.demographics().unwrap();
            let by_region: usize = demographics.by_region.iter().map(|c| c.count).sum();
            let by_age: usize = demographics.by_age_group.iter().map(|c| c.count).sum();
            let people = dashboard.filtered_people().unwrap().len();
            assert_eq!(by_region, people);
            assert_eq!(by_age, people);
        }
    }

    #[test]
    fn test_filters_are_per_domain() {
        let dashboard = dashboard();
        dashboard.set_filter(Domain::Crops, FilterLevel::Region, "Kiambu");

        assert_eq!(dashboard.crops().unwrap().total_records, 1);
        assert_eq!(dashboard.demographics().unwrap().total_farmers, 3);
        assert_eq!(
            dashboard.options(Domain::Crops).subregions,
            vec!["All".to_string(), "Central".to_string()]
        );
    }

    #[test]
    fn test_summary_is_memoized_until_reload() {
        let state = Arc::new(DashboardState::with_store(store()));
        let dashboard = Dashboard::new(state.clone());

        let first = dashboard.crops().unwrap();
        let second = dashboard.crops().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        dashboard.set_filter(Domain::Crops, FilterLevel::Region, "Nairobi");
        let narrowed = dashboard.crops().unwrap();
        assert_eq!(narrowed.total_records, 2);

        // back to All: served from the cache again
        dashboard.set_filter(Domain::Crops, FilterLevel::Region, "All");
        assert!(Arc::ptr_eq(&first, &dashboard.crops().unwrap()));
    }

    #[tokio::test]
    async fn test_reload_invalidates_cache() {
        struct Fixed(RecordStore);

        #[async_trait]
        impl DataSource for Fixed {
            async fn load(&self) -> anyhow::Result<RecordStore> {
                Ok(self.0.clone())
            }

            fn source_name(&self) -> &str {
                "fixed"
            }
        }

        let state = Arc::new(DashboardState::with_store(store()));
        let dashboard = Dashboard::new(state.clone());
        assert_eq!(dashboard.crops().unwrap().total_records, 3);

        let mut smaller = store();
        smaller.crops.truncate(1);
        state.load(&Fixed(smaller)).await.unwrap();

        assert_eq!(dashboard.crops().unwrap().total_records, 1);
    }

    #[tokio::test]
    async fn test_cache_key_and_records_come_from_one_load() {
        struct Fixed(RecordStore);

        #[async_trait]
        impl DataSource for Fixed {
            async fn load(&self) -> anyhow::Result<RecordStore> {
                Ok(self.0.clone())
            }

            fn source_name(&self) -> &str {
                "fixed"
            }
        }

        let state = Arc::new(DashboardState::with_store(store()));
        let dashboard = Dashboard::new(state.clone());

        let (first_store, first_key) = dashboard.ready(Domain::Crops).unwrap();
        assert_eq!(first_key.generation, 1);
        assert!(Arc::ptr_eq(&first_store, &state.store()));

        state.load(&Fixed(store())).await.unwrap();
        let (second_store, second_key) = dashboard.ready(Domain::Crops).unwrap();
        let loaded = state.loaded();
        assert_eq!(second_key.generation, loaded.generation);
        assert!(Arc::ptr_eq(&second_store, &loaded.store));
        assert!(!Arc::ptr_eq(&first_store, &second_store));
    }

    #[test]
    fn test_summaries_serialize() {
        let dashboard = dashboard();
        let json = serde_json::to_value(&*dashboard.demographics().unwrap()).unwrap();
        assert_eq!(json["total_farmers"], 3);
        assert_eq!(json["by_age_group"][2]["label"], "41-60");
        assert_eq!(json["by_age_group"][2]["count"], 3);
    }
}
