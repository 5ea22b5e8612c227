//! Persisted key-value settings.

use anyhow::Context;
use tauri::{AppHandle, Runtime};
use tauri_plugin_store::StoreExt;
use tracing::{error, info};

pub const SETTINGS_FILE: &str = "settings.json";
pub const SELF_TEST_KEY: &str = "check";

/// Writes `check = true` and reads it back.
pub fn store_round_trip<R: Runtime>(app: &AppHandle<R>) -> anyhow::Result<bool> {
    let store = app
        .store(SETTINGS_FILE)
        .context("Failed to open settings store")?;
    store.set(SELF_TEST_KEY, true);
    store.save().context("Failed to persist settings store")?;

    Ok(store
        .get(SELF_TEST_KEY)
        .and_then(|value| value.as_bool())
        .unwrap_or(false))
}

/// Startup self-test of the settings store. Only logs, never fails startup.
pub fn run_self_test<R: Runtime>(app: &AppHandle<R>) {
    info!("Checking if settings store works correctly.");
    match store_round_trip(app) {
        Ok(true) => info!("Settings store works correctly."),
        Ok(false) => error!("Settings store has a problem."),
        Err(e) => error!("Settings store has a problem: {e:#}"),
    }
}
