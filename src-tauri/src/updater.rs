//! Startup update check with desktop notifications.
//!
//! Every outcome produces one notification titled "Fluide". Desktop
//! notifications carry no click callback, so the "click to download" and
//! "click to install" steps are yes/no prompts shown after the notification.

use tauri::{AppHandle, Runtime};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_notification::NotificationExt;
use tauri_plugin_updater::UpdaterExt;
use tracing::{error, info, warn};

use crate::window::WINDOW_TITLE;

/// Update outcomes shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateNotice {
    Available,
    UpToDate,
    Downloaded,
    Failed(String),
}

impl UpdateNotice {
    pub fn body(&self) -> &str {
        match self {
            Self::Available => "Updates are available. Click to download.",
            Self::UpToDate => "Your software is up to date.",
            Self::Downloaded => "The updates are ready. Click to quit and install.",
            Self::Failed(message) => message,
        }
    }

    /// Confirmation text for notices that lead to an action.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Self::Available => Some("A new version is available. Download it now?"),
            Self::Downloaded => Some("The update is ready. Quit and install it now?"),
            Self::UpToDate | Self::Failed(_) => None,
        }
    }
}

fn notify<R: Runtime>(app: &AppHandle<R>, notice: &UpdateNotice) {
    if let Err(e) = app
        .notification()
        .builder()
        .title(WINDOW_TITLE)
        .body(notice.body())
        .show()
    {
        warn!("Failed to show update notification: {e}");
    }
}

/// Shows the notice's prompt; `false` when declined or when it has none.
async fn confirm<R: Runtime>(app: &AppHandle<R>, notice: &UpdateNotice) -> bool {
    let Some(prompt) = notice.prompt() else {
        return false;
    };

    let app = app.clone();
    tokio::task::spawn_blocking(move || {
        app.dialog()
            .message(prompt)
            .title(WINDOW_TITLE)
            .kind(MessageDialogKind::Info)
            .buttons(MessageDialogButtons::YesNo)
            .blocking_show()
    })
    .await
    .unwrap_or(false)
}

async fn check_and_install<R: Runtime>(app: &AppHandle<R>) -> tauri_plugin_updater::Result<()> {
    let current_version = app.package_info().version.to_string();
    let updater = app.updater()?;

    let Some(update) = updater.check().await? else {
        info!("No update available (current version {current_version})");
        notify(app, &UpdateNotice::UpToDate);
        return Ok(());
    };

    info!("Update available: {} → {}", current_version, update.version);
    notify(app, &UpdateNotice::Available);
    if !confirm(app, &UpdateNotice::Available).await {
        info!("Update download postponed by user");
        return Ok(());
    }

    let bytes = update.download(|_, _| {}, || {}).await?;
    info!("Update {} downloaded ({} bytes)", update.version, bytes.len());
    notify(app, &UpdateNotice::Downloaded);
    if !confirm(app, &UpdateNotice::Downloaded).await {
        info!("Update install postponed by user");
        return Ok(());
    }

    update.install(&bytes)?;
    info!("Update {} installed, restarting", update.version);
    app.restart();
}

/// Runs the update check in the background. Failures end in a notification,
/// never in a crash, and are not retried.
pub fn spawn_update_check<R: Runtime>(app: AppHandle<R>) {
    tauri::async_runtime::spawn(async move {
        if let Err(e) = check_and_install(&app).await {
            error!("Update check failed: {e}");
            notify(&app, &UpdateNotice::Failed(e.to_string()));
        }
    });
}
