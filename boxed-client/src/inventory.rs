//! Inventory services
//!
//! Reads fall back to the demo fixtures when the backend fails, so browsing
//! keeps working offline. Writes validate first and report errors.

use crate::ClientError;
use crate::context::AppContext;
use crate::demo::{
    DEMO_CONTAINER_COUNT, DEMO_ITEM_COUNT, demo_container_detail, demo_containers,
};
use boxed_printer::{PngQrEncoder, QrEncoder, QrOptions};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::{Container, Item, NewContainer, NewItem, QrImage, QrPayload};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Bucket holding item photos
pub const ITEM_IMAGE_BUCKET: &str = "item-images";

/// Container with its items
#[derive(Debug, Clone, Serialize)]
pub struct ContainerDetails {
    pub container: Container,
    pub items: Vec<Item>,
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_tubs: usize,
    pub total_items: usize,
}

impl InventoryStats {
    pub const DEMO: InventoryStats = InventoryStats {
        total_tubs: DEMO_CONTAINER_COUNT,
        total_items: DEMO_ITEM_COUNT,
    };
}

/// How often a tag is used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Photo attached when adding an item
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Result of adding an item
#[derive(Debug, Clone)]
pub struct AddedItem {
    pub item: Item,
    /// Set when the photo could not be stored and the item was saved without it
    pub image_warning: Option<String>,
}

impl AppContext {
    /// Containers newest first; falls back to the demo containers
    #[instrument(skip(self), fields(user = %self.session().user_id()))]
    pub async fn list_containers(&self) -> Vec<Container> {
        match self.backend().records.list_containers(self.session()).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Failed to load containers, showing demo data");
                demo_containers()
            }
        }
    }

    /// Container and its items; falls back to a demo placeholder
    #[instrument(skip(self))]
    pub async fn container_details(&self, id: &str) -> ContainerDetails {
        let records = &self.backend().records;
        let loaded = async {
            let container = records.get_container(self.session(), id).await?;
            let items = records.list_items(self.session(), id).await?;
            Ok::<_, ClientError>(ContainerDetails { container, items })
        }
        .await;

        loaded.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load container, showing demo data");
            let (container, items) = demo_container_detail(id);
            ContainerDetails { container, items }
        })
    }

    /// Container and item counts; demo sessions always report the demo totals
    pub async fn stats(&self) -> InventoryStats {
        if self.is_demo() {
            return InventoryStats::DEMO;
        }
        let records = &self.backend().records;
        let counts = async {
            let total_tubs = records.count_containers(self.session()).await?;
            let total_items = records.count_items(self.session()).await?;
            Ok::<_, ClientError>(InventoryStats {
                total_tubs,
                total_items,
            })
        }
        .await;

        counts.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to count inventory, showing demo totals");
            InventoryStats::DEMO
        })
    }

    /// Every item of the user; empty on backend failure
    pub async fn all_items(&self) -> Vec<Item> {
        match self.backend().records.list_all_items(self.session()).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Failed to load items");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create_container(&self, new: NewContainer) -> AppResult<Container> {
        let new = new.normalized()?;
        let container = self
            .backend()
            .records
            .insert_container(self.session(), &new)
            .await?;
        info!(id = %container.id, "Container created");
        Ok(container)
    }

    /// Add an item, uploading its photo first.
    ///
    /// A failed upload does not block the item: it is saved without an
    /// image and the failure is returned as a warning.
    #[instrument(skip(self, new, image), fields(tub_id = %new.tub_id))]
    pub async fn add_item(&self, new: NewItem, image: Option<ImageUpload>) -> AppResult<AddedItem> {
        let mut new = new.normalized()?;
        let mut image_warning = None;

        if let Some(image) = image {
            match self.upload_image(image).await {
                Ok(url) => new.image_url = Some(url),
                Err(e) => {
                    warn!(error = %e, "Image upload failed, saving item without image");
                    image_warning = Some(format!("Image upload failed: {}", e));
                }
            }
        }

        let item = self.backend().records.insert_item(self.session(), &new).await?;
        info!(id = %item.id, "Item added");
        Ok(AddedItem {
            item,
            image_warning,
        })
    }

    async fn upload_image(&self, image: ImageUpload) -> crate::ClientResult<String> {
        let ext = Path::new(&image.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let path = format!("{}/{}.{}", self.session().user_id(), Uuid::new_v4(), ext);
        let blobs = &self.backend().blobs;
        let handle = blobs
            .upload(
                self.session(),
                ITEM_IMAGE_BUCKET,
                &path,
                image.bytes,
                &image.content_type,
            )
            .await?;
        Ok(blobs.public_url(&handle))
    }

    pub async fn delete_container(&self, id: &str) -> AppResult<()> {
        self.backend()
            .records
            .delete_container(self.session(), id)
            .await
            .map_err(|e| missing(e, ErrorCode::ContainerNotFound, id))?;
        info!(id, "Container deleted");
        Ok(())
    }

    pub async fn delete_item(&self, id: &str) -> AppResult<()> {
        self.backend()
            .records
            .delete_item(self.session(), id)
            .await
            .map_err(|e| missing(e, ErrorCode::ItemNotFound, id))?;
        info!(id, "Item deleted");
        Ok(())
    }
}

/// A backend "not found" becomes the record-specific code
fn missing(err: ClientError, code: ErrorCode, id: &str) -> AppError {
    match err {
        ClientError::NotFound(_) => AppError::new(code).with_detail("id", id),
        other => other.into(),
    }
}

/// Case-insensitive match on container name or description
pub fn filter_containers<'a>(containers: &'a [Container], term: &str) -> Vec<&'a Container> {
    containers.iter().filter(|c| c.matches(term)).collect()
}

/// Case-insensitive match on item name, description or any tag
pub fn search_inventory<'a>(items: &'a [Item], term: &str) -> Vec<&'a Item> {
    items.iter().filter(|i| i.matches(term)).collect()
}

/// Tag usage, most used first, ties by name
pub fn tag_counts(items: &[Item]) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in items.iter().flat_map(|i| i.tags.iter()) {
        let tag = tag.trim();
        if !tag.is_empty() {
            *counts.entry(tag).or_default() += 1;
        }
    }

    let mut counts: Vec<_> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    counts
}

/// QR image for a container's label, tinted with its colour
pub fn qr_for_container(container: &Container) -> AppResult<QrImage> {
    let payload = QrPayload::for_container(container)
        .to_json()
        .map_err(|e| AppError::with_message(ErrorCode::QrEncodingFailed, e.to_string()))?;
    Ok(PngQrEncoder.encode(&payload, &QrOptions::for_container(container))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_items;

    #[test]
    fn test_filter_containers() {
        let containers = demo_containers();
        let hits = filter_containers(&containers, "TENT");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Camping Gear");
        assert_eq!(filter_containers(&containers, "  ").len(), 4);
    }

    #[test]
    fn test_search_matches_tags() {
        let items = demo_items();
        let hits = search_inventory(&items, "fragile");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Glass Ornaments");
    }

    #[test]
    fn test_tag_counts_sorted() {
        let items = vec![
            Item::new("1", "t", "a").with_tags([" winter ", "coats"]),
            Item::new("2", "t", "b").with_tags(["winter", ""]),
            Item::new("3", "t", "c").with_tags(["boots", "coats", "winter"]),
        ];
        let counts = tag_counts(&items);
        let pairs: Vec<_> = counts.iter().map(|c| (c.tag.as_str(), c.count)).collect();
        assert_eq!(pairs, [("winter", 3), ("coats", 2), ("boots", 1)]);
    }

    #[test]
    fn test_qr_for_container() {
        let qr = qr_for_container(&Container::named("abc", "Tools")).unwrap();
        assert!(qr.src.starts_with("data:image/png;base64,"));
    }
}
