//! Upload handling: the `file-uploaded` channel and the `convert_images` command.

use std::path::PathBuf;
use std::sync::Arc;
use tauri::{AppHandle, EventId, Runtime, State};
use tauri_plugin_dialog::DialogExt;
use tracing::{debug, info, warn};

use crate::bridge::{Bridge, MessageSink};
use crate::core::{AppState, FileTransfer};
use crate::processing::{convert_batch, FolderPicker, ImageEncoder};
use crate::utils::ConvertResult;

/// Inbound batches and outbound success replies share this channel.
pub const FILE_UPLOADED: &str = "file-uploaded";
/// Outbound failure replies.
pub const ERROR_CHANNEL: &str = "error";

/// Native folder dialog.
pub struct DialogFolderPicker<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> DialogFolderPicker<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> FolderPicker for DialogFolderPicker<R> {
    async fn pick_folder(&self) -> Option<PathBuf> {
        let app = self.app.clone();
        let picked = tokio::task::spawn_blocking(move || app.dialog().file().blocking_pick_folder())
            .await
            .unwrap_or_else(|e| {
                warn!("Folder dialog task failed: {e}");
                None
            })?;

        match picked.into_path() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Folder dialog returned an unusable path: {e}");
                None
            }
        }
    }
}

/// Reply path of one upload request.
///
/// Consumed by [`UploadReply::finish`], so a request answers exactly once.
pub struct UploadReply<S: MessageSink> {
    sink: S,
}

impl<S: MessageSink> UploadReply<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn finish(self, result: ConvertResult<Vec<String>>) {
        match result {
            Ok(names) => {
                info!("Batch converted: {} file(s)", names.len());
                self.sink.send_json(FILE_UPLOADED, serde_json::json!(names));
            }
            Err(e) => {
                debug!("Replying with error: {e}");
                self.sink.send_json(ERROR_CHANNEL, serde_json::json!(e.to_string()));
            }
        }
    }
}

/// Runs one batch and sends its single reply.
pub async fn handle_file_upload<P, E, S>(
    picker: &P,
    encoder: Arc<E>,
    reply: UploadReply<S>,
    files: Vec<FileTransfer>,
) where
    P: FolderPicker,
    E: ImageEncoder,
    S: MessageSink,
{
    debug!("Received {} file(s) on '{}'", files.len(), FILE_UPLOADED);
    let result = convert_batch(picker, encoder, files).await;
    reply.finish(result);
}

/// Subscribes the coordinator to `file-uploaded`.
///
/// Each message gets its own task and reply; concurrent batches share nothing
/// but the encoder.
pub fn listen_for_uploads<R: Runtime>(app: &AppHandle<R>, state: AppState) -> EventId {
    let bridge = Bridge::new(app.clone());
    let picker = Arc::new(DialogFolderPicker::new(app.clone()));
    let sink = bridge.clone();

    bridge.receive::<Vec<FileTransfer>, _>(FILE_UPLOADED, move |payload| {
        let reply = UploadReply::new(sink.clone());
        match payload {
            Ok(files) => {
                let picker = Arc::clone(&picker);
                let encoder = state.encoder();
                tauri::async_runtime::spawn(async move {
                    handle_file_upload(picker.as_ref(), encoder, reply, files).await;
                });
            }
            Err(e) => reply.finish(Err(e)),
        }
    })
}

/// Converts a batch and returns the output names through the invoke promise.
///
/// Same pipeline as the `file-uploaded` channel, but the reply is paired with
/// its request.
#[tauri::command]
pub async fn convert_images(
    app: AppHandle,
    state: State<'_, AppState>,
    files: Vec<FileTransfer>,
) -> ConvertResult<Vec<String>> {
    debug!("Received convert_images command for {} file(s)", files.len());
    let picker = DialogFolderPicker::new(app);
    convert_batch(&picker, state.encoder(), files).await
}
