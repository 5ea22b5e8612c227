//! Main window creation.

use anyhow::Context;
use tauri::{AppHandle, Runtime, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use tracing::info;

use crate::bridge::BRIDGE_SCRIPT;
use crate::core::AppConfig;

#[cfg(target_os = "macos")]
use window_vibrancy::{apply_vibrancy, NSVisualEffectMaterial};

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const WINDOW_TITLE: &str = "Fluide";
const WINDOW_WIDTH: f64 = 900.0;
const WINDOW_HEIGHT: f64 = 680.0;

/// Where the main window loads its UI from.
pub fn entry_url(config: &AppConfig) -> WebviewUrl {
    if config.is_production() {
        WebviewUrl::App("index.html".into())
    } else {
        WebviewUrl::External(config.dev_url.clone())
    }
}

/// Builds the main window with the bridge attached.
pub fn create_main_window<R: Runtime>(
    app: &AppHandle<R>,
    config: &AppConfig,
) -> anyhow::Result<WebviewWindow<R>> {
    let url = entry_url(config);
    info!("Loading main window from {url:?}");

    let builder = WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, url)
        .title(WINDOW_TITLE)
        .inner_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        // Let the page receive HTML5 drops instead of Tauri's file-drop events.
        .disable_drag_drop_handler()
        .initialization_script(BRIDGE_SCRIPT);

    // Vibrancy needs a transparent window (macOSPrivateApi in tauri.conf.json).
    #[cfg(target_os = "macos")]
    let builder = builder.transparent(true);

    let window = builder.build().context("Failed to create main window")?;

    #[cfg(debug_assertions)]
    if config.devtools_enabled() {
        window.open_devtools();
    }

    #[cfg(target_os = "macos")]
    {
        info!("Applying vibrancy effect for macOS");
        if let Err(e) = apply_vibrancy(&window, NSVisualEffectMaterial::HudWindow, None, None) {
            tracing::warn!("Failed to apply vibrancy effect on macOS: {e}");
        }
    }

    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppMode;

    fn config(mode: AppMode) -> AppConfig {
        AppConfig {
            mode,
            dev_url: url::Url::parse("http://127.0.0.1:5000").unwrap(),
        }
    }

    #[test]
    fn production_loads_the_packaged_index() {
        match entry_url(&config(AppMode::Production)) {
            WebviewUrl::App(path) => assert_eq!(path, std::path::PathBuf::from("index.html")),
            other => panic!("unexpected url {other:?}"),
        }
    }

    #[test]
    fn development_loads_the_dev_server() {
        match entry_url(&config(AppMode::Development)) {
            WebviewUrl::External(url) => assert_eq!(url.as_str(), "http://127.0.0.1:5000/"),
            other => panic!("unexpected url {other:?}"),
        }
    }
}
