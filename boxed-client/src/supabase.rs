//! Hosted backend over HTTP
//!
//! - Records: PostgREST under `/rest/v1`
//! - Blobs: storage under `/storage/v1`
//! - Identity: auth under `/auth/v1`
//!
//! Every request carries the anon key as `apikey`; the bearer token is the
//! session's access token, or the anon key when there is none.

use crate::config::BackendConfig;
use crate::store::{BlobHandle, BlobStore, IdentityProvider, RecordStore};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::{Container, Item, NewContainer, NewItem, Session, SessionUser};
use std::time::Duration;
use tracing::{debug, instrument};

const TUBS: &str = "tubs";
const ITEMS: &str = "items";

/// reqwest-backed implementation of all backend seams
#[derive(Debug, Clone)]
pub struct SupabaseBackend {
    client: Client,
    config: BackendConfig,
}

#[derive(Serialize)]
struct ContainerRow<'a> {
    name: &'a str,
    description: &'a str,
    location: &'a str,
    color: &'a str,
    icon: &'a str,
    user_id: &'a str,
}

#[derive(Serialize)]
struct ItemRow<'a> {
    tub_id: &'a str,
    name: &'a str,
    description: &'a str,
    image_url: Option<&'a str>,
    expiry_date: Option<chrono::NaiveDate>,
    tags: &'a [String],
    user_id: &'a str,
}

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<AuthUser> for SessionUser {
    fn from(u: AuthUser) -> Self {
        SessionUser {
            id: u.id,
            email: u.email,
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: AuthUser,
}

/// Sign-up answers with a token response, or with the bare user when the
/// email still needs confirming
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(AuthUser),
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let mut session = Session::live(self.user.into(), self.access_token);
        session.refresh_token = self.refresh_token;
        session
    }
}

impl SupabaseBackend {
    /// Create a backend from configuration
    pub fn new(config: BackendConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let bearer = token
            .or(self.config.access_token.as_deref())
            .unwrap_or(&self.config.anon_key);
        self.client
            .request(method, self.url(path))
            .header("apikey", &self.config.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", bearer))
    }

    fn rest(&self, method: Method, table: &str, session: &Session) -> RequestBuilder {
        self.request(
            method,
            &format!("rest/v1/{}", table),
            session.access_token.as_deref(),
        )
    }

    /// Map the HTTP status, then decode the JSON body
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        response.json().await.map_err(Into::into)
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST
                | StatusCode::CONFLICT
                | StatusCode::UNPROCESSABLE_ENTITY => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(format!("{}: {}", status, text))),
            };
        }

        Ok(response)
    }

    /// PostgREST returns inserted rows as an array
    async fn single_row<T: DeserializeOwned>(
        request: RequestBuilder,
        what: &str,
    ) -> ClientResult<T> {
        let rows: Vec<T> = Self::handle_response(request.send().await?).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse(format!("no {} row returned", what)))
    }

    /// Exact row count from the `Content-Range` header (`0-0/42`, `*/0`)
    async fn count(&self, table: &str, session: &Session) -> ClientResult<usize> {
        let request = self
            .rest(Method::HEAD, table, session)
            .query(&[("select", "id"), ("user_id", eq(session.user_id()).as_str())])
            .header("Prefer", "count=exact");
        let response = Self::check_status(request.send().await?).await?;

        response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| ClientError::InvalidResponse("missing content-range".to_string()))
    }
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

fn parse_content_range_total(value: &str) -> Option<usize> {
    value.rsplit('/').next()?.trim().parse().ok()
}

#[async_trait]
impl RecordStore for SupabaseBackend {
    #[instrument(skip(self, session, new), fields(name = %new.name))]
    async fn insert_container(
        &self,
        session: &Session,
        new: &NewContainer,
    ) -> ClientResult<Container> {
        let row = ContainerRow {
            name: &new.name,
            description: &new.description,
            location: &new.location,
            color: &new.color,
            icon: new.icon.id(),
            user_id: session.user_id(),
        };
        let request = self
            .rest(Method::POST, TUBS, session)
            .header("Prefer", "return=representation")
            .json(&row);
        Self::single_row(request, "container").await
    }

    async fn get_container(&self, session: &Session, id: &str) -> ClientResult<Container> {
        let request = self
            .rest(Method::GET, TUBS, session)
            .query(&[("select", "*"), ("id", eq(id).as_str())]);
        let rows: Vec<Container> = Self::handle_response(request.send().await?).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(format!("container {}", id)))
    }

    #[instrument(skip(self, session), fields(user = %session.user_id()))]
    async fn list_containers(&self, session: &Session) -> ClientResult<Vec<Container>> {
        let request = self.rest(Method::GET, TUBS, session).query(&[
            ("select", "*"),
            ("user_id", eq(session.user_id()).as_str()),
            ("order", "created_at.desc"),
        ]);
        let rows: Vec<Container> = Self::handle_response(request.send().await?).await?;
        debug!(count = rows.len(), "Containers loaded");
        Ok(rows)
    }

    #[instrument(skip(self, session))]
    async fn delete_container(&self, session: &Session, id: &str) -> ClientResult<()> {
        let request = self
            .rest(Method::DELETE, TUBS, session)
            .query(&[("id", eq(id).as_str())]);
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    async fn upsert_container(
        &self,
        session: &Session,
        container: &Container,
    ) -> ClientResult<Container> {
        let mut row = container.clone();
        row.user_id = Some(session.user_id().to_string());
        let request = self
            .rest(Method::POST, TUBS, session)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&row);
        Self::single_row(request, "container").await
    }

    #[instrument(skip(self, session, new), fields(tub_id = %new.tub_id, name = %new.name))]
    async fn insert_item(&self, session: &Session, new: &NewItem) -> ClientResult<Item> {
        let row = ItemRow {
            tub_id: &new.tub_id,
            name: &new.name,
            description: &new.description,
            image_url: new.image_url.as_deref(),
            expiry_date: new.expiry_date,
            tags: &new.tags,
            user_id: session.user_id(),
        };
        let request = self
            .rest(Method::POST, ITEMS, session)
            .header("Prefer", "return=representation")
            .json(&row);
        Self::single_row(request, "item").await
    }

    async fn list_items(&self, session: &Session, tub_id: &str) -> ClientResult<Vec<Item>> {
        let request = self.rest(Method::GET, ITEMS, session).query(&[
            ("select", "*"),
            ("tub_id", eq(tub_id).as_str()),
            ("order", "created_at.desc"),
        ]);
        Self::handle_response(request.send().await?).await
    }

    async fn list_all_items(&self, session: &Session) -> ClientResult<Vec<Item>> {
        let request = self.rest(Method::GET, ITEMS, session).query(&[
            ("select", "*"),
            ("user_id", eq(session.user_id()).as_str()),
            ("order", "created_at.desc"),
        ]);
        Self::handle_response(request.send().await?).await
    }

    #[instrument(skip(self, session))]
    async fn delete_item(&self, session: &Session, id: &str) -> ClientResult<()> {
        let request = self
            .rest(Method::DELETE, ITEMS, session)
            .query(&[("id", eq(id).as_str())]);
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    async fn upsert_item(&self, session: &Session, item: &Item) -> ClientResult<Item> {
        let mut row = item.clone();
        row.user_id = Some(session.user_id().to_string());
        let request = self
            .rest(Method::POST, ITEMS, session)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&row);
        Self::single_row(request, "item").await
    }

    async fn count_containers(&self, session: &Session) -> ClientResult<usize> {
        self.count(TUBS, session).await
    }

    async fn count_items(&self, session: &Session) -> ClientResult<usize> {
        self.count(ITEMS, session).await
    }
}

#[async_trait]
impl BlobStore for SupabaseBackend {
    #[instrument(skip(self, session, bytes), fields(size = bytes.len()))]
    async fn upload(
        &self,
        session: &Session,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ClientResult<BlobHandle> {
        let content_type = HeaderValue::from_str(content_type)
            .map_err(|e| ClientError::Validation(format!("content type: {}", e)))?;
        let request = self
            .request(
                Method::POST,
                &format!("storage/v1/object/{}/{}", bucket, path),
                session.access_token.as_deref(),
            )
            .header(CONTENT_TYPE, content_type)
            .body(bytes);
        Self::check_status(request.send().await?).await?;

        Ok(BlobHandle {
            bucket: bucket.to_string(),
            path: path.to_string(),
        })
    }

    fn public_url(&self, handle: &BlobHandle) -> String {
        self.url(&format!(
            "storage/v1/object/public/{}/{}",
            handle.bucket, handle.path
        ))
    }
}

#[async_trait]
impl IdentityProvider for SupabaseBackend {
    async fn get_session(&self) -> ClientResult<Option<Session>> {
        let Some(token) = self.config.access_token.as_deref() else {
            return Ok(None);
        };
        let request = self.request(Method::GET, "auth/v1/user", Some(token));
        let user: AuthUser = Self::handle_response(request.send().await?).await?;
        Ok(Some(Session::live(user.into(), token)))
    }

    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> ClientResult<Option<Session>> {
        let request = self
            .request(Method::POST, "auth/v1/signup", None)
            .json(&serde_json::json!({ "email": email, "password": password }));
        let response: SignUpResponse = Self::handle_response(request.send().await?).await?;
        Ok(match response {
            SignUpResponse::Session(token) => Some(token.into_session()),
            SignUpResponse::User(_) => None,
        })
    }

    #[instrument(skip(self, password))]
    async fn sign_in_with_password(&self, email: &str, password: &str) -> ClientResult<Session> {
        let request = self
            .request(Method::POST, "auth/v1/token", None)
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }));
        let token: TokenResponse = Self::handle_response(request.send().await?)
            .await
            .map_err(|e| match e {
                // Wrong credentials come back as 400
                ClientError::Validation(_) => ClientError::Unauthorized,
                other => other,
            })?;
        Ok(token.into_session())
    }

    fn oauth_authorize_url(&self, provider: &str, redirect_to: &str) -> ClientResult<String> {
        let url = Url::parse_with_params(
            &self.url("auth/v1/authorize"),
            &[("provider", provider), ("redirect_to", redirect_to)],
        )
        .map_err(|e| ClientError::Validation(format!("authorize url: {}", e)))?;
        Ok(url.into())
    }

    async fn sign_out(&self, session: &Session) -> ClientResult<()> {
        let request = self.request(
            Method::POST,
            "auth/v1/logout",
            session.access_token.as_deref(),
        );
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> ClientResult<()> {
        let request = self
            .request(Method::POST, "auth/v1/recover", None)
            .query(&[("redirect_to", redirect_to)])
            .json(&serde_json::json!({ "email": email }));
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    async fn update_password(&self, session: &Session, new_password: &str) -> ClientResult<()> {
        let token = session
            .access_token
            .as_deref()
            .ok_or(ClientError::Unauthorized)?;
        let request = self
            .request(Method::PUT, "auth/v1/user", Some(token))
            .json(&serde_json::json!({ "password": new_password }));
        Self::check_status(request.send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> SupabaseBackend {
        SupabaseBackend::new(BackendConfig::new("https://abc.supabase.co/", "anon")).unwrap()
    }

    #[test]
    fn test_content_range_total() {
        assert_eq!(parse_content_range_total("0-0/42"), Some(42));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-9/*"), None);
    }

    #[test]
    fn test_public_url() {
        let handle = BlobHandle {
            bucket: "item-images".into(),
            path: "u1/abc.png".into(),
        };
        assert_eq!(
            backend().public_url(&handle),
            "https://abc.supabase.co/storage/v1/object/public/item-images/u1/abc.png"
        );
    }

    #[test]
    fn test_oauth_url() {
        let url = backend()
            .oauth_authorize_url("google", "https://app.example/dashboard")
            .unwrap();
        assert!(url.starts_with("https://abc.supabase.co/auth/v1/authorize?provider=google"));
        assert!(url.contains("redirect_to=https%3A%2F%2Fapp.example%2Fdashboard"));
    }

    #[test]
    fn test_sign_up_response_shapes() {
        let confirmed: SignUpResponse = serde_json::from_str(
            r#"{"access_token":"t","refresh_token":"r","user":{"id":"u1","email":"a@b.c"}}"#,
        )
        .unwrap();
        assert!(matches!(confirmed, SignUpResponse::Session(_)));

        let pending: SignUpResponse =
            serde_json::from_str(r#"{"id":"u1","email":"a@b.c"}"#).unwrap();
        assert!(matches!(pending, SignUpResponse::User(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let backend =
            SupabaseBackend::new(BackendConfig::new("http://127.0.0.1:9", "anon").with_timeout(2))
                .unwrap();
        let err = backend
            .list_containers(&Session::demo())
            .await
            .unwrap_err();
        assert!(err.is_unreachable());
    }
}
