//! Script-to-host callback interfaces.
//!
//! A page never calls host code directly. It holds an opaque object under
//! a stable name whose only operation is `postMessage(raw)`; each call
//! becomes a [`ScriptEvent::Post`](super::ScriptEvent::Post) that the host
//! routes through an [`InterfaceTable`] to the handler registered under
//! that name.

use rustc_hash::FxHashMap;

use super::message::{BridgeMessage, Command};
use super::sink::{EventSink, HostEvent};

/// Name the sample page uses to reach the host.
pub const MESSENGER: &str = "Messenger";

/// Host-side receiver for posts made through one named interface.
///
/// Posts are fire-and-forget: the page gets nothing back regardless of
/// what the handler does.
pub trait JavascriptInterface {
    /// Handle one `postMessage(raw)` call. `raw` is `None` when the page
    /// passed `null`.
    fn on_post(&mut self, raw: Option<&str>);
}

impl<F: FnMut(Option<&str>)> JavascriptInterface for F {
    fn on_post(&mut self, raw: Option<&str>) {
        self(raw);
    }
}

/// Decodes bridge messages and turns `showToast` into a
/// [`HostEvent::Notice`].
///
/// The handler never touches UI state: the notice is queued on the sink
/// and displayed by the main thread.
#[derive(Debug, Clone)]
pub struct Messenger<S> {
    sink: S,
}

impl<S: EventSink> Messenger<S> {
    /// Handler emitting notices into `sink`.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: EventSink> JavascriptInterface for Messenger<S> {
    fn on_post(&mut self, raw: Option<&str>) {
        let Some(raw) = raw else {
            return;
        };
        let message = match BridgeMessage::decode(raw) {
            Ok(message) => message,
            Err(e) => {
                log::warn!("dropping malformed bridge message: {e}");
                return;
            }
        };
        match message.command() {
            Command::ShowToast { text } => {
                if !self.sink.emit(HostEvent::Notice(text)) {
                    log::debug!("notice dropped: event loop closed");
                }
            }
            Command::Unrecognized(kind) => {
                log::debug!("no handler for bridge message type {kind:?}");
            }
        }
    }
}

/// Handlers keyed by the name they are exposed under.
#[derive(Default)]
pub struct InterfaceTable {
    handlers: FxHashMap<String, Box<dyn JavascriptInterface>>,
}

impl InterfaceTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous handler.
    /// Returns `true` if a handler was replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        handler: Box<dyn JavascriptInterface>,
    ) -> bool {
        self.handlers.insert(name.into(), handler).is_some()
    }

    /// Remove the handler for `name`. Returns `true` if one existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.handlers.remove(name).is_some()
    }

    /// Whether a handler is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Deliver a post to the handler for `interface`. Posts to unknown names
    /// are dropped; returns whether a handler received it.
    pub fn deliver(&mut self, interface: &str, raw: Option<&str>) -> bool {
        match self.handlers.get_mut(interface) {
            Some(handler) => {
                handler.on_post(raw);
                true
            }
            None => {
                log::debug!("post to unknown interface {interface:?} dropped");
                false
            }
        }
    }
}

impl std::fmt::Debug for InterfaceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceTable")
            .field("names", &self.names())
            .finish()
    }
}
