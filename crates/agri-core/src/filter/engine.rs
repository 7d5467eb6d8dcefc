//! Filter engine implementation

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::debug;

use super::{FilterContext, FilterLevel, FilterSelection, FilterState, FilterSubscriber};
use crate::records::Domain;

/// Shared handle over the per-domain filter state
///
/// All mutation goes through [`FilterEngine::set_filter`] (or the reset
/// helpers); subscribers are told about every change once the write lock has
/// been released.
pub struct FilterEngine {
    state: Arc<RwLock<FilterState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn FilterSubscriber>>>>,
}

impl FilterEngine {
    /// Create a new engine with every domain set to all-`All`
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(FilterState::new())),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Set one level of a domain's selection, cascading resets downwards
    pub fn set_filter(&self, domain: Domain, level: FilterLevel, value: impl Into<String>) {
        let value = value.into();
        debug!("Setting {} {} filter to '{}'", domain, level, value);

        let mut state = self.state.write();
        state.set_filter(domain, level, value);
        drop(state);

        self.notify_subscribers(domain);
    }

    /// Replace a domain's selection without cascading or validation
    pub fn replace(&self, domain: Domain, selection: FilterSelection) {
        let mut state = self.state.write();
        state.replace(domain, selection);
        drop(state);

        self.notify_subscribers(domain);
    }

    /// Reset a domain to all-`All`
    pub fn reset(&self, domain: Domain) {
        let mut state = self.state.write();
        state.reset(domain);
        drop(state);

        self.notify_subscribers(domain);
    }

    /// Reset every domain to all-`All`
    pub fn reset_all(&self) {
        let mut state = self.state.write();
        state.reset_all();
        drop(state);

        for domain in Domain::ALL {
            self.notify_subscribers(domain);
        }
    }

    /// Current selection for a domain
    pub fn selection(&self, domain: Domain) -> FilterSelection {
        self.state.read().selection(domain).clone()
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn FilterSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Notify all subscribers of a change to `domain`
    fn notify_subscribers(&self, domain: Domain) {
        let context = FilterContext {
            domain,
            selection: self.selection(domain),
        };

        // Drop dead weak references, then notify outside the lock
        let live: Vec<Arc<dyn FilterSubscriber>> = {
            let mut subscribers = self.subscribers.write();
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for subscriber in live {
            subscriber.on_filter_change(&context);
        }
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}
