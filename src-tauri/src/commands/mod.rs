//! Tauri command handlers and event listeners for the frontend.
//!
//! - [`convert_images`]: convert a batch through `invoke`
//! - [`listen_for_uploads`]: the `file-uploaded` / `error` channel pair

mod upload;

pub use upload::*;
