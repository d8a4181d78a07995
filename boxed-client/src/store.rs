//! Backend seams
//!
//! Three collaborators back the application: a record store for the
//! `tubs` and `items` tables, a blob store for item images and an identity
//! provider for sessions. Every record call takes the session explicitly and
//! is scoped to its user.

use crate::ClientResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{Container, Item, NewContainer, NewItem, Session};
use std::sync::Arc;

/// Record storage for containers and items
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_container(&self, session: &Session, new: &NewContainer)
    -> ClientResult<Container>;

    async fn get_container(&self, session: &Session, id: &str) -> ClientResult<Container>;

    /// Containers of the session's user, newest first
    async fn list_containers(&self, session: &Session) -> ClientResult<Vec<Container>>;

    async fn delete_container(&self, session: &Session, id: &str) -> ClientResult<()>;

    /// Insert or replace by id (backup restore)
    async fn upsert_container(&self, session: &Session, container: &Container)
    -> ClientResult<Container>;

    async fn insert_item(&self, session: &Session, new: &NewItem) -> ClientResult<Item>;

    /// Items of one container, newest first
    async fn list_items(&self, session: &Session, tub_id: &str) -> ClientResult<Vec<Item>>;

    /// Every item of the session's user
    async fn list_all_items(&self, session: &Session) -> ClientResult<Vec<Item>>;

    async fn delete_item(&self, session: &Session, id: &str) -> ClientResult<()>;

    async fn upsert_item(&self, session: &Session, item: &Item) -> ClientResult<Item>;

    async fn count_containers(&self, session: &Session) -> ClientResult<usize>;

    async fn count_items(&self, session: &Session) -> ClientResult<usize>;
}

/// Stored object reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobHandle {
    pub bucket: String,
    pub path: String,
}

/// Object storage for item images
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(
        &self,
        session: &Session,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ClientResult<BlobHandle>;

    /// Publicly readable URL of a stored object
    fn public_url(&self, handle: &BlobHandle) -> String;
}

/// Session issuer
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current session, `None` when signed out
    async fn get_session(&self) -> ClientResult<Option<Session>>;

    /// Register; `None` when the account still needs email confirmation
    async fn sign_up(&self, email: &str, password: &str) -> ClientResult<Option<Session>>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> ClientResult<Session>;

    /// URL that starts an OAuth sign-in with `provider`
    fn oauth_authorize_url(&self, provider: &str, redirect_to: &str) -> ClientResult<String>;

    async fn sign_out(&self, session: &Session) -> ClientResult<()>;

    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> ClientResult<()>;

    async fn update_password(&self, session: &Session, new_password: &str) -> ClientResult<()>;
}

/// The three collaborators behind one handle
#[derive(Clone)]
pub struct Backend {
    pub records: Arc<dyn RecordStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl Backend {
    /// Use one implementation for all three seams
    pub fn from_shared<B>(backend: Arc<B>) -> Self
    where
        B: RecordStore + BlobStore + IdentityProvider + 'static,
    {
        Self {
            records: backend.clone(),
            blobs: backend.clone(),
            identity: backend,
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").finish_non_exhaustive()
    }
}
