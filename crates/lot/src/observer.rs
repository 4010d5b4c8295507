//! Observer registration and dispatch

use std::fmt;
use std::sync::Arc;

/// Party interested in a lot's full / space-available transitions.
///
/// Callbacks take `&self`; implementations that count or record use interior
/// mutability. They must not panic: a panicking observer unwinds through the
/// lot operation that triggered it.
pub trait LotObserver: Send + Sync {
    /// The lot has just reached capacity
    fn on_full(&self);

    /// A vehicle has just left the lot
    fn on_space_available(&self);
}

/// Handle returned when an observer is registered; used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}

/// Ordered observer list. Ids are never reused within one registry.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(ObserverId, Arc<dyn LotObserver>)>,
}

impl ObserverRegistry {
    pub(crate) fn add(&mut self, observer: Arc<dyn LotObserver>) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        match self.entries.iter().position(|(entry_id, _)| *entry_id == id) {
            Some(index) => {
                let _ = self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = ObserverId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify_full(&self) {
        for (_, observer) in &self.entries {
            observer.on_full();
        }
    }

    pub(crate) fn notify_space_available(&self) {
        for (_, observer) in &self.entries {
            observer.on_space_available();
        }
    }
}
