//! In-memory demo backend
//!
//! Serves a fixed sample inventory so the application stays usable without
//! a configured or reachable backend. Sign-in always succeeds with a demo
//! session. The fixture functions are also used as fallbacks when a live
//! backend call fails.

use crate::store::{BlobHandle, BlobStore, IdentityProvider, RecordStore};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::DEMO_USER_ID;
use shared::{Container, Item, NewContainer, NewItem, Session, TubVariant};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Container count reported for demo sessions
pub const DEMO_CONTAINER_COUNT: usize = 4;
/// Item count reported for demo sessions
pub const DEMO_ITEM_COUNT: usize = 12;

const SEED_EPOCH: i64 = 1_733_000_000;

fn seeded_at(days_ago: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(SEED_EPOCH - days_ago * 86_400, 0)
}

fn demo_container(
    id: &str,
    name: &str,
    description: &str,
    location: &str,
    color: &str,
    icon: TubVariant,
    days_ago: i64,
) -> Container {
    let mut c = Container::named(id, name)
        .with_description(description)
        .with_location(location)
        .with_color(color)
        .with_icon(icon);
    c.user_id = Some(DEMO_USER_ID.to_string());
    c.created_at = seeded_at(days_ago);
    c
}

/// Sample containers, newest first
pub fn demo_containers() -> Vec<Container> {
    vec![
        demo_container(
            "mock-1",
            "Christmas Decor",
            "Ornaments and lights",
            "Garage",
            "#ff0055",
            TubVariant::Bin,
            0,
        ),
        demo_container(
            "mock-2",
            "Camping Gear",
            "Tents, sleeping bags",
            "Attic",
            "#00ccff",
            TubVariant::Bag,
            1,
        ),
        demo_container(
            "mock-3",
            "Tools",
            "Drills, hammers, nails",
            "Basement",
            "#8a2be2",
            TubVariant::Crate,
            2,
        ),
        demo_container(
            "mock-4",
            "Winter Clothes",
            "Coats, scarves, gloves",
            "Closet",
            "#ffffff",
            TubVariant::Box,
            3,
        ),
    ]
}

/// Sample items, three per sample container
pub fn demo_items() -> Vec<Item> {
    let rows: [(&str, &str, &str, &[&str]); DEMO_ITEM_COUNT] = [
        ("mock-1", "String Lights", "Warm white, 3 strands", &["lights", "christmas"]),
        ("mock-1", "Glass Ornaments", "Wrapped in paper", &["fragile", "christmas"]),
        ("mock-1", "Tree Skirt", "", &["christmas"]),
        ("mock-2", "Tent", "4-person dome", &["camping", "outdoor"]),
        ("mock-2", "Sleeping Bag", "Rated to -5C", &["camping"]),
        ("mock-2", "Camp Stove", "", &["camping", "cooking"]),
        ("mock-3", "Cordless Drill", "With two batteries", &["power tools"]),
        ("mock-3", "Claw Hammer", "", &["hand tools"]),
        ("mock-3", "Box of Nails", "Assorted sizes", &["hardware"]),
        ("mock-4", "Wool Coat", "", &["winter"]),
        ("mock-4", "Scarves", "", &["winter", "accessories"]),
        ("mock-4", "Gloves", "Leather", &["winter", "accessories"]),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (tub_id, name, description, tags))| {
            let mut item = Item::new(format!("demo-item-{}", i + 1), *tub_id, *name)
                .with_tags(tags.iter().copied());
            if !description.is_empty() {
                item = item.with_description(*description);
            }
            item.user_id = Some(DEMO_USER_ID.to_string());
            item.created_at = seeded_at(i as i64);
            item
        })
        .collect()
}

/// Placeholder detail for a container that could not be loaded
pub fn demo_container_detail(id: &str) -> (Container, Vec<Item>) {
    let container = Container::named(id, format!("Demo Tub {}", id))
        .with_description("This is a demo tub for testing purposes.")
        .with_location("Demo Location")
        .with_color("#8a2be2");
    let items = vec![
        Item::new("i1", id, "Demo Item 1").with_description("Sample item"),
        Item::new("i2", id, "Demo Item 2").with_description("Another sample"),
    ];
    (container, items)
}

/// In-memory backend
#[derive(Debug, Default)]
pub struct DemoBackend {
    containers: RwLock<Vec<Container>>,
    items: RwLock<Vec<Item>>,
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl DemoBackend {
    /// Backend holding the sample inventory
    pub fn seeded() -> Self {
        Self {
            containers: RwLock::new(demo_containers()),
            items: RwLock::new(demo_items()),
            blobs: RwLock::default(),
        }
    }

    /// Backend with no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Size of a stored blob, if present
    pub async fn blob_len(&self, handle: &BlobHandle) -> Option<usize> {
        let key = format!("{}/{}", handle.bucket, handle.path);
        self.blobs.read().await.get(&key).map(Vec::len)
    }
}

fn owned_by(user_id: &Option<String>, session: &Session) -> bool {
    user_id.as_deref() == Some(session.user_id())
}

fn newest_first<T>(rows: &mut [T], created_at: impl Fn(&T) -> Option<DateTime<Utc>>) {
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
}

#[async_trait]
impl RecordStore for DemoBackend {
    async fn insert_container(
        &self,
        session: &Session,
        new: &NewContainer,
    ) -> ClientResult<Container> {
        let mut container = Container::named(Uuid::new_v4().to_string(), new.name.clone())
            .with_description(new.description.clone())
            .with_location(new.location.clone())
            .with_color(new.color.clone())
            .with_icon(new.icon);
        container.user_id = Some(session.user_id().to_string());
        container.created_at = Some(Utc::now());

        self.containers.write().await.push(container.clone());
        Ok(container)
    }

    async fn get_container(&self, session: &Session, id: &str) -> ClientResult<Container> {
        self.containers
            .read()
            .await
            .iter()
            .find(|c| c.id == id && owned_by(&c.user_id, session))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("container {}", id)))
    }

    async fn list_containers(&self, session: &Session) -> ClientResult<Vec<Container>> {
        let mut rows: Vec<_> = self
            .containers
            .read()
            .await
            .iter()
            .filter(|c| owned_by(&c.user_id, session))
            .cloned()
            .collect();
        newest_first(&mut rows, |c| c.created_at);
        Ok(rows)
    }

    async fn delete_container(&self, session: &Session, id: &str) -> ClientResult<()> {
        let mut containers = self.containers.write().await;
        let before = containers.len();
        containers.retain(|c| !(c.id == id && owned_by(&c.user_id, session)));
        if containers.len() == before {
            return Err(ClientError::NotFound(format!("container {}", id)));
        }
        drop(containers);

        // Items go with their container
        self.items.write().await.retain(|i| i.tub_id != id);
        Ok(())
    }

    async fn upsert_container(
        &self,
        session: &Session,
        container: &Container,
    ) -> ClientResult<Container> {
        let mut row = container.clone();
        if row.id.is_empty() {
            row.id = Uuid::new_v4().to_string();
        }
        row.user_id = Some(session.user_id().to_string());

        let mut containers = self.containers.write().await;
        match containers.iter_mut().find(|c| c.id == row.id) {
            Some(existing) => *existing = row.clone(),
            None => containers.push(row.clone()),
        }
        Ok(row)
    }

    async fn insert_item(&self, session: &Session, new: &NewItem) -> ClientResult<Item> {
        self.get_container(session, &new.tub_id).await?;

        let mut item = Item::new(Uuid::new_v4().to_string(), new.tub_id.clone(), new.name.clone())
            .with_tags(new.tags.iter().cloned());
        if !new.description.is_empty() {
            item = item.with_description(new.description.clone());
        }
        item.image_url = new.image_url.clone();
        item.expiry_date = new.expiry_date;
        item.user_id = Some(session.user_id().to_string());
        item.created_at = Some(Utc::now());

        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn list_items(&self, session: &Session, tub_id: &str) -> ClientResult<Vec<Item>> {
        let mut rows: Vec<_> = self
            .items
            .read()
            .await
            .iter()
            .filter(|i| i.tub_id == tub_id && owned_by(&i.user_id, session))
            .cloned()
            .collect();
        newest_first(&mut rows, |i| i.created_at);
        Ok(rows)
    }

    async fn list_all_items(&self, session: &Session) -> ClientResult<Vec<Item>> {
        let mut rows: Vec<_> = self
            .items
            .read()
            .await
            .iter()
            .filter(|i| owned_by(&i.user_id, session))
            .cloned()
            .collect();
        newest_first(&mut rows, |i| i.created_at);
        Ok(rows)
    }

    async fn delete_item(&self, session: &Session, id: &str) -> ClientResult<()> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| !(i.id == id && owned_by(&i.user_id, session)));
        if items.len() == before {
            return Err(ClientError::NotFound(format!("item {}", id)));
        }
        Ok(())
    }

    async fn upsert_item(&self, session: &Session, item: &Item) -> ClientResult<Item> {
        let mut row = item.clone();
        if row.id.is_empty() {
            row.id = Uuid::new_v4().to_string();
        }
        row.user_id = Some(session.user_id().to_string());

        let mut items = self.items.write().await;
        match items.iter_mut().find(|i| i.id == row.id) {
            Some(existing) => *existing = row.clone(),
            None => items.push(row.clone()),
        }
        Ok(row)
    }

    async fn count_containers(&self, session: &Session) -> ClientResult<usize> {
        Ok(self.list_containers(session).await?.len())
    }

    async fn count_items(&self, session: &Session) -> ClientResult<usize> {
        Ok(self.list_all_items(session).await?.len())
    }
}

#[async_trait]
impl BlobStore for DemoBackend {
    async fn upload(
        &self,
        _session: &Session,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> ClientResult<BlobHandle> {
        self.blobs
            .write()
            .await
            .insert(format!("{}/{}", bucket, path), bytes);
        Ok(BlobHandle {
            bucket: bucket.to_string(),
            path: path.to_string(),
        })
    }

    fn public_url(&self, handle: &BlobHandle) -> String {
        format!("demo://{}/{}", handle.bucket, handle.path)
    }
}

#[async_trait]
impl IdentityProvider for DemoBackend {
    async fn get_session(&self) -> ClientResult<Option<Session>> {
        Ok(Some(Session::demo()))
    }

    async fn sign_up(&self, email: &str, _password: &str) -> ClientResult<Option<Session>> {
        Ok(Some(Session::demo_with_email(email)))
    }

    async fn sign_in_with_password(&self, email: &str, _password: &str) -> ClientResult<Session> {
        Ok(Session::demo_with_email(email))
    }

    fn oauth_authorize_url(&self, _provider: &str, redirect_to: &str) -> ClientResult<String> {
        // Already signed in; go straight to the destination
        Ok(redirect_to.to_string())
    }

    async fn sign_out(&self, _session: &Session) -> ClientResult<()> {
        Ok(())
    }

    async fn reset_password_for_email(&self, _email: &str, _redirect_to: &str) -> ClientResult<()> {
        Ok(())
    }

    async fn update_password(&self, _session: &Session, _new_password: &str) -> ClientResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_counts() {
        assert_eq!(demo_containers().len(), DEMO_CONTAINER_COUNT);
        assert_eq!(demo_items().len(), DEMO_ITEM_COUNT);
        let ids: Vec<_> = demo_containers().into_iter().map(|c| c.id).collect();
        assert!(demo_items().iter().all(|i| ids.contains(&i.tub_id)));
    }

    #[test]
    fn test_detail_placeholder() {
        let (container, items) = demo_container_detail("42");
        assert_eq!(container.name, "Demo Tub 42");
        assert_eq!(container.location.as_deref(), Some("Demo Location"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Demo Item 1");
    }

    #[tokio::test]
    async fn test_seeded_list_is_newest_first() {
        let backend = DemoBackend::seeded();
        let rows = backend.list_containers(&Session::demo()).await.unwrap();
        let names: Vec<_> = rows.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["Christmas Decor", "Camping Gear", "Tools", "Winter Clothes"]
        );
    }

    #[tokio::test]
    async fn test_rows_are_scoped_to_user() {
        let backend = DemoBackend::seeded();
        let other = Session::live(
            shared::SessionUser {
                id: "someone-else".into(),
                email: None,
            },
            "token",
        );
        assert!(backend.list_containers(&other).await.unwrap().is_empty());
        assert!(backend.get_container(&other, "mock-1").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_container_removes_items() {
        let backend = DemoBackend::seeded();
        let session = Session::demo();
        backend.delete_container(&session, "mock-2").await.unwrap();
        assert!(backend.list_items(&session, "mock-2").await.unwrap().is_empty());
        assert_eq!(backend.count_items(&session).await.unwrap(), 9);
    }
}
