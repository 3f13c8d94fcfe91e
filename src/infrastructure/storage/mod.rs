//! JSON file-based durable slots

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::errors::StorageError;
use crate::domain::entities::Catalog;
use crate::domain::traits::DurableSlot;

/// Persists the whole catalog as a JSON array in one named slot file and
/// the most recently uploaded image data URL in a second one.
pub struct JsonSlotStore {
    base_path: PathBuf,
    catalog_slot: String,
    image_slot: String,
}

impl JsonSlotStore {
    pub fn new(
        base_path: impl Into<PathBuf>,
        catalog_slot: impl Into<String>,
        image_slot: impl Into<String>,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            catalog_slot: catalog_slot.into(),
            image_slot: image_slot.into(),
        }
    }

    pub async fn init(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", slot))
    }
}

#[async_trait]
impl DurableSlot for JsonSlotStore {
    /// Absent or malformed content degrades to an empty catalog; the
    /// caller never sees an error
    async fn load(&self) -> Catalog {
        let path = self.slot_path(&self.catalog_slot);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read slot {:?}: {}", path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("malformed catalog in {:?}, starting empty: {}", path, e);
                Vec::new()
            }
        }
    }

    /// Whole-catalog overwrite in a single write
    async fn save(&self, catalog: &Catalog) -> Result<(), StorageError> {
        let json = serde_json::to_vec(catalog)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        tokio::fs::write(self.slot_path(&self.catalog_slot), json).await?;
        Ok(())
    }

    async fn load_image(&self) -> Option<String> {
        let path = self.slot_path(&self.image_slot);
        let content = tokio::fs::read_to_string(&path).await.ok()?;
        match serde_json::from_str(&content) {
            Ok(data_url) => Some(data_url),
            Err(e) => {
                tracing::warn!("malformed image slot {:?}: {}", path, e);
                None
            }
        }
    }

    async fn save_image(&self, data_url: &str) -> Result<(), StorageError> {
        let json = serde_json::to_vec(&data_url)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        tokio::fs::write(self.slot_path(&self.image_slot), json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Product;

    fn store(dir: &tempfile::TempDir) -> JsonSlotStore {
        JsonSlotStore::new(dir.path(), "products", "uploaded-image")
    }

    #[tokio::test]
    async fn test_load_of_absent_slot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store(&dir).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_slot_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let slots = store(&dir);
        tokio::fs::write(dir.path().join("products.json"), b"{not json")
            .await
            .unwrap();
        assert!(slots.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let slots = store(&dir);
        let catalog = vec![Product::new(1, "Widget", 9.99).with_category("tools")];
        slots.save(&catalog).await.unwrap();
        assert_eq!(slots.load().await, catalog);
    }

    #[tokio::test]
    async fn test_save_load_save_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let slots = store(&dir);
        let catalog = vec![
            Product::new(1, "a", 1.5).with_rating(4.2, 7),
            Product::new(2, "b", 2.0),
        ];
        slots.save(&catalog).await.unwrap();
        let first = tokio::fs::read(dir.path().join("products.json")).await.unwrap();

        let reloaded = slots.load().await;
        slots.save(&reloaded).await.unwrap();
        let second = tokio::fs::read(dir.path().join("products.json")).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_image_slot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let slots = store(&dir);
        assert!(slots.load_image().await.is_none());
        slots.save_image("data:image/png;base64,AAAA").await.unwrap();
        assert_eq!(
            slots.load_image().await.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }
}
