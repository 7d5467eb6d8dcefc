//! Filter subscriber trait

use super::FilterContext;

/// Trait for components that recompute when a domain's filter changes
pub trait FilterSubscriber: Send + Sync {
    /// Called after every filter mutation with the new selection
    fn on_filter_change(&self, context: &FilterContext);
}
