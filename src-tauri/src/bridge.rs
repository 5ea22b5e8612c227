//! Message relay between the web UI and the Rust core.
//!
//! The UI side is [`BRIDGE_SCRIPT`], injected into the main window only. It
//! exposes `window.api` with three pass-throughs onto the Tauri event API and
//! performs no validation of channel names or payloads. [`Bridge`] is the
//! same surface on the Rust side.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tauri::{AppHandle, EventId, EventTarget, Emitter, Listener, Runtime};
use tracing::error;

use crate::utils::{ConvertError, ConvertResult};
use crate::window::MAIN_WINDOW_LABEL;

/// Initialization script exposing `window.api.{send, receive, receiveOnce}`.
///
/// `send` forwards a single argument as-is and several as an array, addressed
/// to the core only. Subscriptions listen on the main window's target, so the
/// UI sees core replies but never its own requests on the same channel.
pub const BRIDGE_SCRIPT: &str = r#"
(function () {
  if (window.api) return;
  const events = () => window.__TAURI__.event;
  const toCore = { kind: "App" };
  const fromCore = { target: { kind: "WebviewWindow", label: "main" } };
  const api = {
    send: (channel, ...data) => {
      events().emitTo(toCore, channel, data.length === 1 ? data[0] : data);
    },
    receive: (channel, func) => {
      events().listen(channel, (event) => func(event.payload), fromCore);
    },
    receiveOnce: (channel, func) => {
      events().once(channel, (event) => func(event.payload), fromCore);
    },
  };
  Object.defineProperty(window, "api", { value: Object.freeze(api) });
})();
"#;

/// Outbound half of the relay, the only thing an upload reply needs.
pub trait MessageSink: Send + Sync {
    fn send_json(&self, channel: &str, payload: serde_json::Value);
}

/// Rust-side relay over an [`AppHandle`].
///
/// Outbound messages go to the main window only, so the core's own
/// listeners never see its replies even when channel names coincide.
pub struct Bridge<R: Runtime> {
    app: AppHandle<R>,
    target: EventTarget,
}

impl<R: Runtime> Clone for Bridge<R> {
    fn clone(&self) -> Self {
        Self {
            app: self.app.clone(),
            target: self.target.clone(),
        }
    }
}

impl<R: Runtime> Bridge<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self {
            app,
            target: EventTarget::labeled(MAIN_WINDOW_LABEL),
        }
    }

    /// Fire-and-forget message to the UI.
    pub fn send<S: Serialize + Clone>(&self, channel: &str, payload: S) -> tauri::Result<()> {
        self.app.emit_to(self.target.clone(), channel, payload)
    }

    /// Persistent subscription. Undecodable payloads reach the handler as
    /// [`ConvertError::Payload`].
    pub fn receive<T, F>(&self, channel: &str, handler: F) -> EventId
    where
        T: DeserializeOwned + 'static,
        F: Fn(ConvertResult<T>) + Send + 'static,
    {
        self.app
            .listen(channel.to_string(), move |event| handler(decode(event.payload())))
    }

    /// Single-fire subscription, removed after its first delivery.
    pub fn receive_once<T, F>(&self, channel: &str, handler: F) -> EventId
    where
        T: DeserializeOwned + 'static,
        F: FnOnce(ConvertResult<T>) + Send + 'static,
    {
        self.app
            .once(channel.to_string(), move |event| handler(decode(event.payload())))
    }

    pub fn unlisten(&self, id: EventId) {
        self.app.unlisten(id);
    }
}

impl<R: Runtime> MessageSink for Bridge<R> {
    fn send_json(&self, channel: &str, payload: serde_json::Value) {
        if let Err(e) = self.send(channel, payload) {
            error!("Failed to send message on '{}': {}", channel, e);
        }
    }
}

fn decode<T: DeserializeOwned>(payload: &str) -> ConvertResult<T> {
    serde_json::from_str(payload).map_err(ConvertError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tauri::WebviewWindowBuilder;

    #[test]
    fn receive_once_fires_at_most_once() {
        let app = tauri::test::mock_app();
        let bridge = Bridge::new(app.handle().clone());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        bridge.receive_once::<u32, _>("ping", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for n in 0..3u32 {
            app.emit("ping", n).unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn receive_keeps_listening_and_decodes_payloads() {
        let app = tauri::test::mock_app();
        let bridge = Bridge::new(app.handle().clone());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        bridge.receive::<Vec<String>, _>("names", move |payload| {
            sink.lock().unwrap().push(payload);
        });

        app.emit("names", vec!["a.webp"]).unwrap();
        app.emit("names", 42).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], Ok(vec!["a.webp".to_string()]));
        assert!(matches!(seen[1], Err(ConvertError::Payload(_))));
    }

    #[test]
    fn unlisten_stops_delivery() {
        let app = tauri::test::mock_app();
        let bridge = Bridge::new(app.handle().clone());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let id = bridge.receive::<serde_json::Value, _>("tick", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        app.emit("tick", ()).unwrap();
        bridge.unlisten(id);
        app.emit("tick", ()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn replies_do_not_loop_back_into_core_listeners() {
        let app = tauri::test::mock_app();
        let bridge = Bridge::new(app.handle().clone());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        bridge.receive::<serde_json::Value, _>("file-uploaded", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        bridge.send_json("file-uploaded", serde_json::json!(["a.webp"]));

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn ui_requests_reach_the_core_but_not_ui_listeners() {
        let app = tauri::test::mock_app();
        let window = WebviewWindowBuilder::new(&app, MAIN_WINDOW_LABEL, Default::default())
            .build()
            .unwrap();
        let bridge = Bridge::new(app.handle().clone());
        let core_calls = Arc::new(AtomicUsize::new(0));
        let ui_calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&core_calls);
        bridge.receive::<serde_json::Value, _>("file-uploaded", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&ui_calls);
        window.listen("file-uploaded", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // Same addressing as `window.api.send`.
        app.emit_to(EventTarget::App, "file-uploaded", serde_json::json!([{"fileName": "a.png"}]))
            .unwrap();
        assert_eq!(core_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ui_calls.load(Ordering::SeqCst), 0);

        bridge.send_json("file-uploaded", serde_json::json!(["a.webp"]));
        assert_eq!(core_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ui_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn script_addresses_core_and_listens_on_main_window() {
        assert!(BRIDGE_SCRIPT.contains(r#"emitTo(toCore, channel"#));
        assert!(BRIDGE_SCRIPT.contains(r#"const toCore = { kind: "App" };"#));
        assert!(BRIDGE_SCRIPT.contains(&format!(
            r#"{{ kind: "WebviewWindow", label: "{MAIN_WINDOW_LABEL}" }}"#
        )));
        assert!(!BRIDGE_SCRIPT.contains("events().emit("));
    }
}
