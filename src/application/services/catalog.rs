//! Catalog service - synchronization and the single mutation path

use std::collections::HashSet;
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex};

use base64::Engine;
use tokio::task::JoinHandle;

use crate::application::errors::{AdminError, StorageError};
use crate::application::state::CatalogStore;
use crate::application::validation::{validate_product, ProductDraft};
use crate::domain::entities::{next_id, Catalog, Product};
use crate::domain::traits::{DurableSlot, RemoteCatalog};

/// Orchestrates the durable slot, the remote gateway and the in-memory
/// store. Local state is the source of truth; the remote side is mirrored
/// best-effort by detached tasks whose acks are only logged. Pending
/// mirror handles are kept so a caller can drain them before the runtime
/// shuts down; otherwise an exiting process would abort the round trips.
pub struct CatalogService<S, G> {
    slot: Arc<S>,
    gateway: Arc<G>,
    store: Arc<CatalogStore>,
    mirrors: Mutex<Vec<JoinHandle<()>>>,
}

/// Union of two catalogs keyed by id. On collision the local entry wins:
/// local writes are considered newer than whatever the remote returns.
pub fn merge_catalogs(local: Catalog, remote: Catalog) -> Catalog {
    let mut seen: HashSet<u64> = HashSet::new();
    let mut merged = Vec::with_capacity(local.len() + remote.len());
    for product in local {
        if seen.insert(product.id) {
            merged.push(product);
        }
    }
    for product in remote {
        if seen.insert(product.id) {
            merged.push(product);
        }
    }
    merged
}

impl<S, G> CatalogService<S, G>
where
    S: DurableSlot + 'static,
    G: RemoteCatalog + 'static,
{
    pub fn new(slot: Arc<S>, gateway: Arc<G>, store: Arc<CatalogStore>) -> Self {
        Self {
            slot,
            gateway,
            store,
            mirrors: Mutex::new(Vec::new()),
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    fn spawn_mirror(&self, mirror: impl Future<Output = ()> + Send + 'static) {
        let mut mirrors = self.mirrors.lock().unwrap();
        mirrors.retain(|handle| !handle.is_finished());
        mirrors.push(tokio::spawn(mirror));
    }

    /// Wait for every pending remote mirror attempt to finish. Acks were
    /// already logged by the tasks themselves; this only keeps the calls
    /// from being aborted when the runtime is torn down.
    pub async fn flush_remote(&self) {
        let pending: Vec<JoinHandle<()>> = self.mirrors.lock().unwrap().drain(..).collect();
        for handle in pending {
            let _ = handle.await;
        }
    }

    /// Reconcile the durable slot with the remote catalog. Runs once per
    /// view-mount, not on every mutation. A failed remote fetch degrades
    /// to an empty remote side and the view still comes up.
    pub async fn sync(&self) -> Result<Catalog, StorageError> {
        let local = self.slot.load().await;
        let remote = self.gateway.fetch_all().await;
        tracing::debug!(
            "syncing catalog: {} local, {} remote",
            local.len(),
            remote.len()
        );

        let merged = merge_catalogs(local, remote);
        self.slot.save(&merged).await?;
        self.store.publish(merged.clone());
        tracing::info!("catalog synced: {} products", merged.len());
        Ok(merged)
    }

    /// Create a product from a validated draft, assigning a fresh id
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, AdminError> {
        let errors = validate_product(&draft);
        if !errors.is_empty() {
            return Err(AdminError::Validation(errors));
        }

        let catalog = self.slot.load().await;
        let product = self.build_product(next_id(&catalog), draft).await;

        let gateway = Arc::clone(&self.gateway);
        let remote = product.clone();
        self.spawn_mirror(async move {
            let ack = gateway.create(&remote).await;
            tracing::info!("remote create of product {}: {}", remote.id, ack);
        });

        let mut catalog = catalog;
        catalog.push(product.clone());
        self.commit(catalog).await?;
        Ok(product)
    }

    /// Replace the fields of an existing product, keeping its id
    pub async fn update_product(
        &self,
        id: u64,
        draft: ProductDraft,
    ) -> Result<Product, AdminError> {
        let errors = validate_product(&draft);
        if !errors.is_empty() {
            return Err(AdminError::Validation(errors));
        }

        let product = self.build_product(id, draft).await;

        let gateway = Arc::clone(&self.gateway);
        let remote = product.clone();
        self.spawn_mirror(async move {
            let ack = gateway.update(id, &remote).await;
            tracing::info!("remote update of product {}: {}", id, ack);
        });

        let catalog: Catalog = self
            .slot
            .load()
            .await
            .into_iter()
            .map(|p| if p.id == id { product.clone() } else { p })
            .collect();
        self.commit(catalog).await?;
        Ok(product)
    }

    /// Remove a product by id; removing an absent id is a no-op
    pub async fn delete_product(&self, id: u64) -> Result<(), AdminError> {
        let gateway = Arc::clone(&self.gateway);
        self.spawn_mirror(async move {
            let ack = gateway.remove(id).await;
            tracing::info!("remote delete of product {}: {}", id, ack);
        });

        let mut catalog = self.slot.load().await;
        catalog.retain(|p| p.id != id);
        self.commit(catalog).await?;
        Ok(())
    }

    /// Look a product up in the local slot only; mutations pre-check with
    /// this so a remote-only id cannot masquerade as locally editable
    pub async fn find_local(&self, id: u64) -> Option<Product> {
        self.slot.load().await.into_iter().find(|p| p.id == id)
    }

    /// Look a product up locally first, then fall back to the remote
    /// service. `None` means not found anywhere and renders as the
    /// not-found view.
    pub async fn get_product(&self, id: u64) -> Option<Product> {
        if let Some(product) = self.find_local(id).await {
            return Some(product);
        }
        self.gateway.fetch_one(id).await
    }

    /// Read a local image file into a data URL and remember it as the
    /// most recently uploaded image
    pub async fn store_image(&self, path: &Path) -> Result<String, AdminError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AdminError::Storage(StorageError::Io(e)))?;
        let mime = match path.extension().and_then(|e| e.to_str()) {
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "image/jpeg",
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        let data_url = format!("data:{};base64,{}", mime, encoded);
        self.slot.save_image(&data_url).await?;
        Ok(data_url)
    }

    /// A draft submitted without an image falls back to the most recently
    /// uploaded one
    async fn build_product(&self, id: u64, draft: ProductDraft) -> Product {
        let image = if draft.image.is_empty() {
            self.slot.load_image().await.unwrap_or_default()
        } else {
            draft.image
        };
        Product::new(id, draft.title, draft.price)
            .with_description(draft.description)
            .with_category(draft.category)
            .with_image(image)
            .with_rating(draft.rate, draft.count)
    }

    /// Steps (d) and (e) of the mutation path: persist the new catalog,
    /// then publish it so every view projection re-renders
    async fn commit(&self, catalog: Catalog) -> Result<(), AdminError> {
        self.slot.save(&catalog).await?;
        self.store.publish(catalog);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, title: &str, price: f64) -> Product {
        Product::new(id, title, price)
    }

    #[test]
    fn test_merge_unions_by_id() {
        let local = vec![product(1, "a", 1.0), product(2, "b", 2.0)];
        let remote = vec![product(2, "b-remote", 9.0), product(3, "c", 3.0)];
        let merged = merge_catalogs(local, remote);

        let mut ids: Vec<u64> = merged.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_local_entry_wins_collisions() {
        let local = vec![product(5, "local title", 1.0)];
        let remote = vec![product(5, "remote title", 99.0)];
        let merged = merge_catalogs(local, remote);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "local title");
        assert_eq!(merged[0].price, 1.0);
    }

    #[test]
    fn test_merge_deduplicates_within_one_side() {
        let local = vec![product(1, "first", 1.0), product(1, "dup", 2.0)];
        let merged = merge_catalogs(local, Vec::new());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "first");
    }

    #[test]
    fn test_merge_with_empty_remote_keeps_local() {
        let local = vec![product(1, "a", 1.0)];
        let merged = merge_catalogs(local.clone(), Vec::new());
        assert_eq!(merged, local);
    }
}
