//! Webview security policy.
//!
//! Applied to every webview through a plugin hook so windows created later
//! (including ones opened by page script) get the same rules:
//! - navigation is limited to the origin the app itself is served from;
//! - the bridge script is only ever attached by [`crate::window`] to the main
//!   window, and `capabilities/default.json` grants IPC to `main` alone;
//! - in development [`grant_dev_ipc`] extends that grant to the dev server
//!   origin, which Tauri otherwise treats as remote.

use tauri::ipc::CapabilityBuilder;
use tauri::plugin::{Builder, TauriPlugin};
use tauri::{Manager, Runtime};
use tracing::{debug, warn};
use url::Url;

use crate::core::{AppConfig, AppMode};
use crate::window::MAIN_WINDOW_LABEL;

/// Fixed navigation allow-list.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    mode: AppMode,
    dev_origin: String,
}

impl NavigationPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            mode: config.mode,
            dev_origin: config.dev_origin(),
        }
    }

    /// Development allows the dev server origin; production allows only the
    /// packaged bundle.
    pub fn allows(&self, url: &Url) -> bool {
        match self.mode {
            AppMode::Development => origin(url) == self.dev_origin,
            AppMode::Production => is_bundle_url(url),
        }
    }

    /// [`Self::allows`], logging blocked attempts.
    pub fn check(&self, url: &Url) -> bool {
        let allowed = self.allows(url);
        if !allowed {
            warn!("Stopped attempt to open: {url}");
        }
        allowed
    }
}

fn origin(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port_or_known_default() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Bundled assets are served from `tauri://localhost` on macOS/Linux and
/// `http(s)://tauri.localhost` on Windows.
fn is_bundle_url(url: &Url) -> bool {
    match url.scheme() {
        "tauri" => url.host_str() == Some("localhost"),
        "http" | "https" => url.host_str() == Some("tauri.localhost"),
        _ => false,
    }
}

/// Plugin enforcing [`NavigationPolicy`] on every webview.
pub fn webview_guard<R: Runtime>(policy: NavigationPolicy) -> TauriPlugin<R> {
    Builder::new("webview-guard")
        .on_navigation(move |_webview, url| policy.check(url))
        .on_webview_ready(|webview| {
            if webview.label() == MAIN_WINDOW_LABEL {
                debug!("Main webview ready");
            } else {
                debug!("Webview '{}' ready without bridge or IPC grants", webview.label());
            }
        })
        .build()
}

pub const DEV_CAPABILITY: &str = "dev-remote";

/// Grants the main window IPC from the configured dev server.
///
/// No-op in production, where the UI only ever loads from the bundle.
pub fn grant_dev_ipc<R: Runtime, M: Manager<R>>(manager: &M, config: &AppConfig) -> tauri::Result<()> {
    if config.is_production() {
        return Ok(());
    }

    let pattern = config.dev_remote_pattern();
    manager.add_capability(
        CapabilityBuilder::new(DEV_CAPABILITY)
            .remote(pattern.clone())
            .window(MAIN_WINDOW_LABEL)
            .permission("core:default"),
    )?;
    debug!("Granted IPC to {pattern}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(mode: AppMode) -> NavigationPolicy {
        NavigationPolicy {
            mode,
            dev_origin: "127.0.0.1:5000".to_string(),
        }
    }

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn development_allows_only_the_dev_server() {
        let policy = policy(AppMode::Development);

        assert!(policy.allows(&url("http://127.0.0.1:5000/")));
        assert!(policy.allows(&url("http://127.0.0.1:5000/@vite/client")));
        assert!(!policy.allows(&url("http://127.0.0.1:5001/")));
        assert!(!policy.allows(&url("https://example.com/")));
        assert!(!policy.allows(&url("tauri://localhost/index.html")));
    }

    #[test]
    fn production_allows_only_the_bundle() {
        let policy = policy(AppMode::Production);

        assert!(policy.allows(&url("tauri://localhost/index.html")));
        assert!(policy.allows(&url("http://tauri.localhost/index.html")));
        assert!(!policy.allows(&url("http://127.0.0.1:5000/")));
        assert!(!policy.allows(&url("https://example.com/")));
        assert!(!policy.allows(&url("file:///etc/passwd")));
    }

    #[test]
    fn dev_origin_comes_from_config() {
        let config = AppConfig {
            mode: AppMode::Development,
            dev_url: url("http://localhost:1420"),
        };
        let policy = NavigationPolicy::from_config(&config);

        assert!(policy.allows(&url("http://localhost:1420/index.html")));
        assert!(!policy.check(&url("http://localhost:5000/")));
    }

    #[test]
    fn production_adds_no_remote_grant() {
        let app = tauri::test::mock_app();
        let config = AppConfig {
            mode: AppMode::Production,
            dev_url: url("http://localhost:1420"),
        };

        assert!(grant_dev_ipc(&app, &config).is_ok());
    }
}
