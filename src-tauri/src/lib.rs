// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
pub mod window;
pub mod bridge;
pub mod security;
pub mod updater;
pub mod commands;

// Public exports for external consumers
pub use bridge::{Bridge, MessageSink, BRIDGE_SCRIPT};
pub use self::core::{AppConfig, AppMode, AppState, FileTransfer};
pub use security::{webview_guard, NavigationPolicy};
pub use utils::{ConvertError, ConvertResult};
pub use commands::*;

// The application entry point is in main.rs; this crate root exposes the
// pieces it wires together.
