//! Local catalog store - the in-memory owner of the product collection

use crate::domain::entities::Catalog;
use tokio::sync::watch;

/// In-process owner of the catalog for the lifetime of the session.
///
/// Reads are synchronous snapshots; writes go through `publish`, which
/// also wakes every subscribed view projection. The store is an explicit
/// owned object handed to its consumers, never ambient state.
#[derive(Debug)]
pub struct CatalogStore {
    tx: watch::Sender<Catalog>,
}

impl CatalogStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx }
    }

    /// Current catalog contents
    pub fn snapshot(&self) -> Catalog {
        self.tx.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    pub fn get(&self, id: u64) -> Option<crate::domain::entities::Product> {
        self.tx.borrow().iter().find(|p| p.id == id).cloned()
    }

    /// Replace the catalog and notify subscribers. A publish with no live
    /// subscribers is harmless, so a late mutation finishing after the
    /// last view unmounted cannot poison anything.
    pub fn publish(&self, catalog: Catalog) {
        self.tx.send_replace(catalog);
    }

    /// Subscribe to catalog changes; used by view projections to re-render
    pub fn subscribe(&self) -> watch::Receiver<Catalog> {
        self.tx.subscribe()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
