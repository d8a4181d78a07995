use crate::cli::Cli;
use boxed_client::BackendConfig;
use std::path::PathBuf;

/// boxedup configuration, read from the environment (`.env` is loaded first)
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend project URL
    pub supabase_url: Option<String>,
    /// Backend anon key
    pub supabase_anon_key: Option<String>,
    /// Access token of an already signed-in user
    pub access_token: Option<String>,
    /// Where label documents and backups are written
    pub output_dir: PathBuf,
    /// Daily rolling log files go here when the directory exists
    pub log_dir: Option<PathBuf>,
    /// JSON log lines
    pub log_json: bool,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let first = |keys: &[&str]| keys.iter().find_map(|k| get(k));

        Self {
            supabase_url: first(&[
                "SUPABASE_URL",
                "VITE_SUPABASE_URL",
                "NEXT_PUBLIC_SUPABASE_URL",
            ]),
            supabase_anon_key: first(&[
                "SUPABASE_ANON_KEY",
                "VITE_SUPABASE_ANON_KEY",
                "NEXT_PUBLIC_SUPABASE_ANON_KEY",
            ]),
            access_token: get("BOXEDUP_ACCESS_TOKEN"),
            output_dir: get("BOXEDUP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("labels")),
            log_dir: get("BOXEDUP_LOG_DIR").map(PathBuf::from),
            log_json: get("BOXEDUP_LOG_JSON")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            timeout_secs: get("BOXEDUP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Command-line flags win over the environment
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(url) = &cli.url {
            self.supabase_url = Some(url.clone());
        }
        if let Some(key) = &cli.key {
            self.supabase_anon_key = Some(key.clone());
        }
        if let Some(token) = &cli.token {
            self.access_token = Some(token.clone());
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(dir) = &cli.log_dir {
            self.log_dir = Some(dir.clone());
        }
        self.log_json |= cli.log_json;
    }

    /// Backend settings; missing values become placeholders (demo mode)
    pub fn backend_config(&self) -> BackendConfig {
        let placeholder = BackendConfig::placeholder();
        let mut config = BackendConfig::new(
            self.supabase_url.clone().unwrap_or(placeholder.url),
            self.supabase_anon_key
                .clone()
                .unwrap_or(placeholder.anon_key),
        )
        .with_timeout(self.timeout_secs);
        if let Some(token) = &self.access_token {
            config = config.with_access_token(token.clone());
        }
        config
    }
}
