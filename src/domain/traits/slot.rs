use crate::application::errors::StorageError;
use crate::domain::entities::Catalog;
use async_trait::async_trait;

/// Durable slot - abstraction for whole-catalog persistence.
///
/// `load` never fails: an absent or malformed slot yields an empty catalog
/// and a log line. `save` overwrites the slot in a single write; the unit
/// of durability is the whole catalog. A second slot holds the most
/// recently uploaded image as a data URL.
#[async_trait]
pub trait DurableSlot: Send + Sync {
    async fn load(&self) -> Catalog;
    async fn save(&self, catalog: &Catalog) -> Result<(), StorageError>;

    async fn load_image(&self) -> Option<String>;
    async fn save_image(&self, data_url: &str) -> Result<(), StorageError>;
}
