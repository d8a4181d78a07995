//! Authenticated session context
//!
//! A `Session` is passed explicitly to every service that needs the
//! current user. When the identity provider cannot be reached the
//! application builds [`Session::demo`] instead and keeps working against
//! the fixed demo data.

use serde::{Deserialize, Serialize};

/// User id of the fabricated demo session
pub const DEMO_USER_ID: &str = "demo-user";
/// Email of the fabricated demo session
pub const DEMO_USER_EMAIL: &str = "demo@boxedup.app";

/// Where the session came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Issued by the identity provider
    #[default]
    Live,
    /// Fabricated locally because the provider was unreachable
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub mode: SessionMode,
}

impl Session {
    /// Live session issued by the identity provider
    pub fn live(user: SessionUser, access_token: impl Into<String>) -> Self {
        Self {
            user,
            access_token: Some(access_token.into()),
            refresh_token: None,
            mode: SessionMode::Live,
        }
    }

    /// Fallback session used when the provider is unreachable
    pub fn demo() -> Self {
        Self::demo_with_email(DEMO_USER_EMAIL)
    }

    /// Demo session that keeps the email the user typed at sign-in
    pub fn demo_with_email(email: impl Into<String>) -> Self {
        Self {
            user: SessionUser {
                id: DEMO_USER_ID.to_string(),
                email: Some(email.into()),
            },
            access_token: None,
            refresh_token: None,
            mode: SessionMode::Demo,
        }
    }

    pub fn is_demo(&self) -> bool {
        self.mode == SessionMode::Demo || self.user.id == DEMO_USER_ID
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref()
    }
}
