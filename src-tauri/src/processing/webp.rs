// src-tauri/src/processing/webp.rs

//! Lossy WebP encoding through libvips.
//!
//! Buffers are decoded with `VipsImage::new_from_buffer`, so any format the
//! linked libvips can sniff is accepted. Nothing is validated up front: a
//! malformed buffer surfaces as the loader's own error message.

use lazy_static::lazy_static;
use libvips::ops::{self, ForeignKeep};
use libvips::{VipsApp, VipsImage};
use tracing::debug;

use crate::utils::{ConvertError, ConvertResult};

const WEBP_EFFORT: i32 = 4;
const ALPHA_QUALITY: i32 = 100;

/// Thread-safe holder for the process-wide libvips runtime.
///
/// `VipsApp` shuts libvips down on drop, so it lives in a static for the
/// whole process.
struct VipsAppGuard(VipsApp);

// libvips is designed for concurrent use; individual VipsImage instances must
// not be shared between threads, but concurrent creation on separate threads is safe.
unsafe impl Send for VipsAppGuard {}
unsafe impl Sync for VipsAppGuard {}

lazy_static! {
    static ref VIPS: Result<VipsAppGuard, String> = VipsApp::default("fluide")
        .map(|app| {
            // 0 = let libvips decide based on available CPU cores
            app.concurrency_set(0);
            VipsAppGuard(app)
        })
        .map_err(|e| format!("Failed to initialize libvips: {e}"));
}

/// Encodes one source image buffer into the target format.
pub trait ImageEncoder: Send + Sync + 'static {
    fn encode(&self, source: &[u8], quality: u8) -> ConvertResult<Vec<u8>>;
}

/// libvips-backed lossy WebP encoder.
#[derive(Debug)]
pub struct WebpEncoder {
    _private: (),
}

impl WebpEncoder {
    /// Initializes libvips on first use.
    pub fn new() -> ConvertResult<Self> {
        match &*VIPS {
            Ok(_) => Ok(Self { _private: () }),
            Err(e) => Err(ConvertError::codec(e.clone())),
        }
    }
}

impl ImageEncoder for WebpEncoder {
    fn encode(&self, source: &[u8], quality: u8) -> ConvertResult<Vec<u8>> {
        let image = VipsImage::new_from_buffer(source, "")
            .map_err(|e| ConvertError::codec(e.to_string()))?;

        let opts = ops::WebpsaveBufferOptions {
            q: i32::from(quality),
            lossless: false,
            alpha_q: ALPHA_QUALITY,
            effort: WEBP_EFFORT,
            smart_subsample: false,
            keep: ForeignKeep::None,
            ..ops::WebpsaveBufferOptions::default()
        };

        let encoded = ops::webpsave_buffer_with_opts(&image, &opts)
            .map_err(|e| ConvertError::codec(e.to_string()))?;

        debug!(
            "Encoded {}×{} image at q{}: {} → {} bytes",
            image.get_width(),
            image.get_height(),
            quality,
            source.len(),
            encoded.len()
        );

        Ok(encoded)
    }
}
