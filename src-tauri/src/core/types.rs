//! Wire types exchanged with the UI.

use serde::{Deserialize, Serialize};

/// One file sent by the UI for conversion.
///
/// `fileBuffer` is the raw encoded source image as a byte array. `quality`
/// may be omitted or null, both meaning maximum quality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTransfer {
    /// Original file name, only used to derive the output name
    pub file_name: String,
    /// Encoded source image
    pub file_buffer: Vec<u8>,
    /// Encoder quality (0-100)
    #[serde(default)]
    pub quality: Option<f64>,
}
