//! Runtime mode and environment configuration.

use std::env;
use tracing::warn;
use url::Url;

pub const ENV_MODE: &str = "FLUIDE_ENV";
pub const ENV_DEV_URL: &str = "FLUIDE_DEV_URL";
pub const DEFAULT_DEV_URL: &str = "http://127.0.0.1:5000";

/// Whether the UI is served by a local dev server or bundled with the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Development,
    Production,
}

impl AppMode {
    /// Parses `FLUIDE_ENV`; unset or unknown values fall back to the build profile.
    fn resolve(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("production") | Some("prod") => Self::Production,
            Some("development") | Some("dev") => Self::Development,
            _ if cfg!(debug_assertions) => Self::Development,
            _ => Self::Production,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: AppMode,
    pub dev_url: Url,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(env::var(ENV_MODE).ok().as_deref(), env::var(ENV_DEV_URL).ok().as_deref())
    }

    fn from_values(mode: Option<&str>, dev_url: Option<&str>) -> Self {
        let dev_url = match dev_url.map(Url::parse) {
            Some(Ok(url)) => url,
            Some(Err(e)) => {
                warn!("Ignoring invalid {ENV_DEV_URL}: {e}");
                default_dev_url()
            }
            None => default_dev_url(),
        };

        Self {
            mode: AppMode::resolve(mode),
            dev_url,
        }
    }

    pub fn is_production(&self) -> bool {
        self.mode == AppMode::Production
    }

    pub fn should_check_updates(&self) -> bool {
        self.is_production()
    }

    pub fn devtools_enabled(&self) -> bool {
        !self.is_production()
    }

    /// `host:port` of the dev server, the only origin allowed in development.
    pub fn dev_origin(&self) -> String {
        match self.dev_url.port_or_known_default() {
            Some(port) => format!("{}:{port}", self.dev_url.host_str().unwrap_or_default()),
            None => self.dev_url.host_str().unwrap_or_default().to_string(),
        }
    }

    /// Remote URL pattern matching every page of the dev server.
    pub fn dev_remote_pattern(&self) -> String {
        format!("{}/*", self.dev_url.origin().ascii_serialization())
    }
}

fn default_dev_url() -> Url {
    Url::parse(DEFAULT_DEV_URL).expect("default dev url is valid")
}
