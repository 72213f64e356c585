//! Lock-free cache of resolved reference systems

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use crossbeam::queue::SegQueue;
use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;
use crate::projection::crs::ReferenceSystem;

/// A reference system PROJ has accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrsDefinition {
    /// The resolved system
    pub system: ReferenceSystem,
}

/// Shared registry of resolved reference systems
///
/// Entries are immutable once inserted. Clones share the same storage, so one
/// registry can be handed to every request handler or worker thread.
pub struct CrsRegistry {
    entries: Arc<DashMap<ReferenceSystem, Arc<CrsDefinition>>>,
    order: Arc<SegQueue<ReferenceSystem>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    max_entries: usize,
}

impl CrsRegistry {
    /// Creates a new registry
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of definitions to keep (default: 64)
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            order: Arc::new(SegQueue::new()),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            max_entries: max_entries.max(1),
        }
    }

    /// Returns the cached definition or resolves it through PROJ
    pub fn resolve(&self, system: &ReferenceSystem) -> Result<Arc<CrsDefinition>> {
        if let Some(entry) = self.entries.get(system) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(entry.value()));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        system.resolve()?;

        let definition = Arc::new(CrsDefinition {
            system: system.clone(),
        });

        while self.entries.len() >= self.max_entries {
            if let Some(old) = self.order.pop() {
                self.entries.remove(&old);
            } else {
                break;
            }
        }

        // Another thread may have inserted the same system meanwhile; keep theirs.
        let stored = {
            let entry = self.entries.entry(system.clone()).or_insert_with(|| {
                self.order.push(system.clone());
                Arc::clone(&definition)
            });
            Arc::clone(entry.value())
        };

        debug!(%system, "resolved reference system");
        Ok(stored)
    }

    /// Returns the cached definition without resolving
    pub fn get(&self, system: &ReferenceSystem) -> Option<Arc<CrsDefinition>> {
        self.entries.get(system).map(|entry| Arc::clone(entry.value()))
    }

    /// Clears the registry
    pub fn clear(&self) {
        self.entries.clear();

        while self.order.pop().is_some() {}
    }

    /// Returns the current number of cached definitions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns registry statistics
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            entry_count: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            max_entries: self.max_entries,
        }
    }
}

impl Clone for CrsRegistry {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            order: Arc::clone(&self.order),
            hits: Arc::clone(&self.hits),
            misses: Arc::clone(&self.misses),
            max_entries: self.max_entries,
        }
    }
}

impl Default for CrsRegistry {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Registry statistics
#[derive(Debug, Clone)]
pub struct RegistryStats {
    /// Number of definitions currently cached
    pub entry_count: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that went to PROJ
    pub misses: u64,
    /// Maximum number of definitions
    pub max_entries: usize,
}
