//! Typed notifications about loads and filter changes

use std::any::{Any, TypeId};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::filter::FilterSelection;
use crate::records::Domain;

/// Anything that can travel over the [`EventBus`]
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// Receives events of the type it was registered for
pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &dyn Event);
}

type Listeners = Vec<Arc<dyn EventHandler>>;

/// Routes each published event to the handlers registered for its type
///
/// Handlers run after the registry lock is released, so a handler may
/// subscribe or publish again without blocking.
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<AHashMap<TypeId, Listeners>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of type `E`
    pub fn subscribe<E: Event>(&self, handler: Arc<dyn EventHandler>) {
        self.listeners
            .write()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(handler);
    }

    /// Hand `event` to every handler registered for `E`
    pub fn publish<E: Event>(&self, event: E) {
        let listeners = match self.listeners.read().get(&TypeId::of::<E>()) {
            Some(listeners) => listeners.clone(),
            None => return,
        };
        for listener in &listeners {
            listener.handle(&event);
        }
    }

    /// Number of handlers registered for `E`
    pub fn listener_count<E: Event>(&self) -> usize {
        self.listeners
            .read()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

struct FnHandler<F>(F);

impl<F> EventHandler for FnHandler<F>
where
    F: Fn(&dyn Event) + Send + Sync,
{
    fn handle(&self, event: &dyn Event) {
        (self.0)(event)
    }
}

/// Wrap a closure as an [`EventHandler`]
pub fn handler_from_fn<F>(f: F) -> Arc<dyn EventHandler>
where
    F: Fn(&dyn Event) + Send + Sync + 'static,
{
    Arc::new(FnHandler(f))
}

/// The record store was (re)loaded
#[derive(Debug, Clone)]
pub struct DataLoaded {
    pub source_name: String,
    pub people: usize,
    pub crops: usize,
    pub livestock: usize,
    pub aquaculture: usize,
}

/// Loading from a data source failed
#[derive(Debug, Clone)]
pub struct DataLoadFailed {
    pub source_name: String,
    pub error: String,
}

/// A domain's filter selection changed
#[derive(Debug, Clone)]
pub struct FilterChanged {
    pub domain: Domain,
    pub selection: FilterSelection,
}

macro_rules! dashboard_events {
    ($($name:ident),* $(,)?) => {
        $(
            impl Event for $name {
                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

dashboard_events!(DataLoaded, DataLoadFailed, FilterChanged);
