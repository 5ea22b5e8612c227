//! Concurrent batch conversion.
//!
//! One folder is requested per batch, then every file is encoded and written
//! on its own task. The first failure to complete ends the batch; tasks still
//! in flight are detached, not aborted, so they may finish writing.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::core::FileTransfer;
use crate::processing::ImageEncoder;
use crate::utils::{
    output_name, output_path, resolve_quality, write_output, ConvertError, ConvertResult,
};

/// Asks the user for the destination folder of a batch.
pub trait FolderPicker: Send + Sync {
    /// `None` when the prompt was dismissed.
    fn pick_folder(&self) -> impl Future<Output = Option<PathBuf>> + Send;
}

/// Converts `files` into the chosen folder and returns the output names in
/// input order.
pub async fn convert_batch<P, E>(
    picker: &P,
    encoder: Arc<E>,
    files: Vec<FileTransfer>,
) -> ConvertResult<Vec<String>>
where
    P: FolderPicker,
    E: ImageEncoder,
{
    let dir = picker.pick_folder().await.ok_or(ConvertError::Cancelled)?;

    let total = files.len();
    info!("Converting {} file(s) into {}", total, dir.display());

    let mut tasks = JoinSet::new();
    for (idx, file) in files.into_iter().enumerate() {
        let encoder = Arc::clone(&encoder);
        let dir = dir.clone();
        tasks.spawn(async move { convert_one(encoder, &dir, file).await.map(|name| (idx, name)) });
    }

    let mut names: Vec<Option<String>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined.map_err(ConvertError::from).and_then(|result| result);
        match outcome {
            Ok((idx, name)) => names[idx] = Some(name),
            Err(e) => {
                warn!("Batch failed after {} of {} file(s): {}", names.iter().flatten().count(), total, e);
                tasks.detach_all();
                return Err(e);
            }
        }
    }

    Ok(names.into_iter().flatten().collect())
}

/// Encodes and writes a single file, returning its output name.
async fn convert_one<E: ImageEncoder>(
    encoder: Arc<E>,
    dir: &Path,
    file: FileTransfer,
) -> ConvertResult<String> {
    let quality = resolve_quality(file.quality)?;
    let name = output_name(&file.file_name);
    let buffer = file.file_buffer;

    // Encoding is CPU-bound; keep it off the async workers.
    let encoded =
        tokio::task::spawn_blocking(move || encoder.encode(&buffer, quality)).await??;

    write_output(&output_path(dir, &name), &encoded).await?;
    debug!("Wrote {} ({} bytes)", name, encoded.len());

    Ok(name)
}
