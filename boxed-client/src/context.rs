//! Application context
//!
//! Replaces ambient "current user" lookups: the session is established once
//! and passed to every service through [`AppContext`].

use crate::config::BackendConfig;
use crate::demo::DemoBackend;
use crate::store::Backend;
use crate::supabase::SupabaseBackend;
use shared::error::{AppError, AppResult};
use shared::{Session, SessionMode};
use std::sync::Arc;
use tracing::{info, warn};

/// Redirect after an OAuth sign-in
pub const OAUTH_REDIRECT_PATH: &str = "/dashboard";
/// Redirect from a password-reset email
pub const PASSWORD_RESET_PATH: &str = "/update-password";
/// Shortest password the identity provider accepts
pub const MIN_PASSWORD_LEN: usize = 6;

/// Backend handle plus the session every call is made for
#[derive(Debug, Clone)]
pub struct AppContext {
    backend: Backend,
    session: Session,
}

impl AppContext {
    /// Build a context from an existing session
    pub fn new(backend: Backend, session: Session) -> Self {
        Self { backend, session }
    }

    /// Retrieve the current session.
    ///
    /// An unreachable provider falls back to the demo session; a reachable
    /// provider with nobody signed in is an error.
    pub async fn establish(backend: Backend) -> AppResult<Self> {
        match backend.identity.get_session().await {
            Ok(Some(session)) => {
                info!(user = %session.user_id(), mode = ?session.mode, "Session established");
                Ok(Self::new(backend, session))
            }
            Ok(None) => Err(AppError::not_authenticated()),
            Err(e) => {
                warn!(error = %e, "Identity provider unavailable, using demo session");
                Ok(Self::new(backend, Session::demo()))
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// Wrong credentials are rejected; an unreachable provider signs in to
    /// demo mode keeping the typed email.
    pub async fn sign_in(backend: Backend, email: &str, password: &str) -> AppResult<Self> {
        match backend.identity.sign_in_with_password(email, password).await {
            Ok(session) => Ok(Self::new(backend, session)),
            Err(e) if e.is_unreachable() => {
                warn!(error = %e, "Sign-in failed, continuing in demo mode");
                Ok(Self::new(backend, Session::demo_with_email(email)))
            }
            Err(e) => Err(AppError::invalid_credentials().with_detail("reason", e.to_string())),
        }
    }

    /// Register a new account.
    ///
    /// `None` means the account exists but the email must be confirmed
    /// before signing in.
    pub async fn sign_up(backend: Backend, email: &str, password: &str) -> AppResult<Option<Self>> {
        check_password(password)?;
        let session = backend.identity.sign_up(email.trim(), password).await?;
        info!(confirmed = session.is_some(), "Account created");
        Ok(session.map(|session| Self::new(backend, session)))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn is_demo(&self) -> bool {
        self.session.is_demo()
    }

    pub async fn sign_out(self) -> AppResult<()> {
        if self.session.mode == SessionMode::Live {
            self.backend.identity.sign_out(&self.session).await?;
        }
        Ok(())
    }

    /// URL that starts an OAuth sign-in, returning to the dashboard at `origin`
    pub fn oauth_url(backend: &Backend, provider: &str, origin: &str) -> AppResult<String> {
        let redirect = format!("{}{}", origin.trim_end_matches('/'), OAUTH_REDIRECT_PATH);
        Ok(backend.identity.oauth_authorize_url(provider, &redirect)?)
    }

    /// Send a password-reset email linking back to `origin`
    pub async fn request_password_reset(
        backend: &Backend,
        email: &str,
        origin: &str,
    ) -> AppResult<()> {
        let redirect = format!("{}{}", origin.trim_end_matches('/'), PASSWORD_RESET_PATH);
        backend
            .identity
            .reset_password_for_email(email, &redirect)
            .await?;
        Ok(())
    }

    pub async fn update_password(&self, new_password: &str) -> AppResult<()> {
        check_password(new_password)?;
        self.backend
            .identity
            .update_password(&self.session, new_password)
            .await?;
        Ok(())
    }
}

fn check_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation("Password must be at least 6 characters")
            .with_detail("field", "password"));
    }
    Ok(())
}

/// Pick the backend for a configuration: the hosted one when real
/// credentials are present, the seeded demo backend otherwise
pub fn backend_for(config: &BackendConfig) -> AppResult<Backend> {
    if !config.is_configured() {
        warn!("Backend credentials missing or placeholder, running in demo mode");
        return Ok(Backend::from_shared(Arc::new(DemoBackend::seeded())));
    }
    let backend = SupabaseBackend::new(config.clone())?;
    info!(url = %config.base_url(), "Using hosted backend");
    Ok(Backend::from_shared(Arc::new(backend)))
}
