use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info};

use crate::data::DataSource;
use crate::events::{DataLoadFailed, DataLoaded, EventBus, FilterChanged};
use crate::filter::{FilterEngine, FilterLevel, FilterSelection, FilterSubscriber};
use crate::options::FilterOptions;
use crate::records::Domain;
use crate::store::RecordStore;

/// Progress of the initial data load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Waiting on the data source
    Loading,
    /// Records are available
    Ready,
    /// The data source failed; nothing may be aggregated until a retry succeeds
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadStatus::Ready)
    }

    /// Error text of a failed load
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A loaded record store together with the generation it was installed as
#[derive(Debug, Clone)]
pub struct LoadedStore {
    /// Bumped after every successful load; 0 before the first
    pub generation: u64,
    pub store: Arc<RecordStore>,
}

/// The dashboard session: record store, load status and filters
///
/// Passed explicitly to whatever needs it; nothing looks it up globally.
/// Filters are only changed through the session so every change is
/// announced on the event bus.
pub struct DashboardState {
    /// The loaded records and their generation, swapped together
    loaded: Arc<RwLock<LoadedStore>>,

    /// Status of the most recent load
    status: Arc<RwLock<LoadStatus>>,

    /// Per-domain filter selections
    filters: Arc<FilterEngine>,

    /// The event bus
    pub event_bus: Arc<EventBus>,
}

impl DashboardState {
    /// Create a state that is still waiting for its data
    pub fn new() -> Self {
        Self {
            loaded: Arc::new(RwLock::new(LoadedStore {
                generation: 0,
                store: Arc::new(RecordStore::default()),
            })),
            status: Arc::new(RwLock::new(LoadStatus::Loading)),
            filters: Arc::new(FilterEngine::new()),
            event_bus: Arc::new(EventBus::new()),
        }
    }

    /// Create a state around records that are already in memory
    pub fn with_store(store: RecordStore) -> Self {
        let state = Self::new();
        state.install(store);
        state
    }

    /// Load (or retry loading) from a data source
    ///
    /// On success the store is replaced and every filter is reset to `All`.
    /// On failure the status carries the error and the error is returned.
    pub async fn load(&self, source: &dyn DataSource) -> anyhow::Result<()> {
        *self.status.write() = LoadStatus::Loading;
        info!("Loading survey data from {}", source.source_name());

        match source.load().await {
            Ok(store) => {
                let loaded = DataLoaded {
                    source_name: source.source_name().to_string(),
                    people: store.people.len(),
                    crops: store.crops.len(),
                    livestock: store.livestock.len(),
                    aquaculture: store.aquaculture.len(),
                };
                info!(
                    "Loaded {} farmers, {} crops, {} livestock, {} aquaculture records",
                    loaded.people, loaded.crops, loaded.livestock, loaded.aquaculture
                );

                self.install(store);
                self.event_bus.publish(loaded);
                Ok(())
            }
            Err(err) => {
                let message = format!("{:#}", err);
                error!("Failed to load data from {}: {}", source.source_name(), message);

                *self.status.write() = LoadStatus::Failed(message.clone());
                self.event_bus.publish(DataLoadFailed {
                    source_name: source.source_name().to_string(),
                    error: message,
                });
                Err(err)
            }
        }
    }

    fn install(&self, store: RecordStore) {
        {
            let mut loaded = self.loaded.write();
            loaded.generation += 1;
            loaded.store = Arc::new(store);
        }
        self.filters.reset_all();
        *self.status.write() = LoadStatus::Ready;
    }

    /// Current load status
    pub fn status(&self) -> LoadStatus {
        self.status.read().clone()
    }

    /// The current store and its generation, read under one lock
    pub fn loaded(&self) -> LoadedStore {
        self.loaded.read().clone()
    }

    /// The current record store
    pub fn store(&self) -> Arc<RecordStore> {
        self.loaded.read().store.clone()
    }

    /// Identifies the current store contents
    pub fn generation(&self) -> u64 {
        self.loaded.read().generation
    }

    /// Change one filter level and announce the new selection
    pub fn set_filter(&self, domain: Domain, level: FilterLevel, value: impl Into<String>) {
        self.filters.set_filter(domain, level, value);
        self.announce(domain);
    }

    /// Put a previously saved selection back as-is
    ///
    /// The selection is not checked with [`FilterSelection::is_consistent`].
    pub fn restore_selection(&self, domain: Domain, selection: FilterSelection) {
        self.filters.replace(domain, selection);
        self.announce(domain);
    }

    /// Reset one domain's filters to `All`
    pub fn reset_filters(&self, domain: Domain) {
        self.filters.reset(domain);
        self.announce(domain);
    }

    fn announce(&self, domain: Domain) {
        self.event_bus.publish(FilterChanged {
            domain,
            selection: self.filters.selection(domain),
        });
    }

    /// Current selection for a domain
    pub fn selection(&self, domain: Domain) -> FilterSelection {
        self.filters.selection(domain)
    }

    /// Register for direct filter change callbacks
    ///
    /// Only a weak reference is kept; the caller owns the subscriber.
    pub fn add_subscriber(&self, subscriber: Arc<dyn FilterSubscriber>) {
        self.filters.add_subscriber(subscriber);
    }

    /// Option lists for a domain under its current selection
    pub fn options(&self, domain: Domain) -> FilterOptions {
        FilterOptions::derive(&self.store(), domain, &self.selection(domain))
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
