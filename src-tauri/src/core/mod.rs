//! Core application types and state management.
//!
//! - [`AppState`]: Application state managed by Tauri
//! - [`AppConfig`]: Development/production mode and dev server URL
//! - [`FileTransfer`]: One file of an upload batch

mod config;
mod settings;
mod state;
mod types;

pub use config::{AppConfig, AppMode, DEFAULT_DEV_URL};
pub use settings::{run_self_test, store_round_trip, SELF_TEST_KEY, SETTINGS_FILE};
pub use state::AppState;
pub use types::FileTransfer;
