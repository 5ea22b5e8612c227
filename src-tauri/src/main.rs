// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// This is the primary entry point for Fluide.
// The lib.rs file exposes the modules wired together here.

use tauri::{Manager, RunEvent};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use fluide_lib::commands::listen_for_uploads;
use fluide_lib::core::{run_self_test, AppConfig, AppState};
use fluide_lib::security::{grant_dev_ipc, webview_guard, NavigationPolicy};
use fluide_lib::updater::spawn_update_check;
use fluide_lib::window::create_main_window;
#[cfg(target_os = "macos")]
use fluide_lib::window::MAIN_WINDOW_LABEL;

fn init_tracing(config: &AppConfig) {
    let default_level = if config.is_production() { "info" } else { "debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stdout)
        .compact()                // Use compact formatter instead of pretty
        .init();
}

fn main() {
    let config = AppConfig::from_env();
    init_tracing(&config);

    info!("=== Application Starting ({:?}) ===", config.mode);

    let state = match AppState::new(config.clone()) {
        Ok(state) => state,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let setup_config = config.clone();
    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_store::Builder::new().build())
        .plugin(webview_guard(NavigationPolicy::from_config(&config)))
        .manage(state)
        .invoke_handler(tauri::generate_handler![fluide_lib::commands::convert_images])
        .setup(move |app| {
            let app_handle = app.app_handle().clone();

            run_self_test(&app_handle);

            // Register updater plugin (desktop only). A broken updater config
            // must not keep the app from starting.
            #[cfg(desktop)]
            match app_handle.plugin(tauri_plugin_updater::Builder::new().build()) {
                Ok(()) => debug!("✓ Updater plugin initialized"),
                Err(e) => warn!("Updater plugin unavailable: {e}"),
            }

            let state = app_handle.state::<AppState>().inner().clone();
            listen_for_uploads(&app_handle, state);
            debug!("✓ Listening for uploads");

            // The dev server is a remote origin as far as the ACL is concerned.
            if let Err(e) = grant_dev_ipc(&app_handle, &setup_config) {
                error!("Failed to grant IPC to the dev server: {e}");
            }

            if let Err(e) = create_main_window(&app_handle, &setup_config) {
                error!("{e:#}");
                app_handle.exit(1);
                return Ok(());
            }

            if setup_config.should_check_updates() {
                spawn_update_check(app_handle);
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    info!("Starting application event loop...");
    app.run(move |_app_handle, event| match event {
        // macOS apps stay alive without windows until the user quits explicitly.
        #[cfg(target_os = "macos")]
        RunEvent::ExitRequested { code: None, api, .. } => {
            api.prevent_exit();
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { has_visible_windows: false, .. } => {
            if _app_handle.get_webview_window(MAIN_WINDOW_LABEL).is_none() {
                if let Err(e) = create_main_window(_app_handle, &config) {
                    error!("{e:#}");
                }
            }
        }
        RunEvent::Exit => info!("Application exiting"),
        _ => {}
    });
}
