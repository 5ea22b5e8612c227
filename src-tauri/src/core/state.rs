//! Application state management for Tauri.

use std::sync::Arc;
use tracing::debug;
use crate::core::AppConfig;
use crate::processing::WebpEncoder;
use crate::utils::ConvertResult;

/// Application state managed by Tauri.
///
/// Holds only immutable, shareable pieces: each upload builds its own
/// request context, so nothing here is mutated while batches run.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    encoder: Arc<WebpEncoder>,
}

impl AppState {
    /// Creates the state and brings up libvips.
    pub fn new(config: AppConfig) -> ConvertResult<Self> {
        let encoder = WebpEncoder::new()?;
        debug!("WebP encoder ready ({:?} mode)", config.mode);
        Ok(Self {
            config,
            encoder: Arc::new(encoder),
        })
    }

    pub fn encoder(&self) -> Arc<WebpEncoder> {
        Arc::clone(&self.encoder)
    }
}
