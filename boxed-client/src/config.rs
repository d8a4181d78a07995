//! Backend configuration

/// Project URL used when none is configured
pub const PLACEHOLDER_URL: &str = "https://example.supabase.co";
/// Anon key used when none is configured
pub const PLACEHOLDER_KEY: &str = "mock-key";

/// Connection settings for the hosted backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project URL (e.g., "https://xyz.supabase.co")
    pub url: String,

    /// Public anon key sent as `apikey`
    pub anon_key: String,

    /// User access token, if already signed in
    pub access_token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            access_token: None,
            timeout: 30,
        }
    }

    /// Placeholder configuration; always routes to the demo backend
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_URL, PLACEHOLDER_KEY)
    }

    /// Set the access token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Real credentials are present (not missing, not placeholders)
    pub fn is_configured(&self) -> bool {
        self.url.starts_with("http")
            && self.url != PLACEHOLDER_URL
            && !self.anon_key.trim().is_empty()
            && self.anon_key != PLACEHOLDER_KEY
    }

    /// URL without trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::placeholder()
    }
}
