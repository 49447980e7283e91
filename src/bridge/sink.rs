use std::sync::mpsc;

use super::envelope::ScriptEvent;

/// Events delivered to the host's main thread.
///
/// Everything that reaches host UI state goes through one of these: the
/// IPC handler, interface handlers and script-result callbacks only ever
/// emit events, and the event loop applies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A decoded envelope posted by page script.
    Script(ScriptEvent),
    /// Show a transient notice with this text.
    Notice(String),
    /// A theme definition script finished evaluating.
    ThemeRegistered(String),
    /// The page finished switching to the named theme.
    ThemeApplied(String),
}

/// Sending half of the host event queue.
///
/// Implementations must be safe to call from the webview's script thread.
pub trait EventSink {
    /// Queue an event for the main thread. Returns `false` if the receiving
    /// side is gone.
    fn emit(&self, event: HostEvent) -> bool;
}

impl EventSink for mpsc::Sender<HostEvent> {
    fn emit(&self, event: HostEvent) -> bool {
        self.send(event).is_ok()
    }
}

#[cfg(feature = "viewer")]
impl EventSink for winit::event_loop::EventLoopProxy<HostEvent> {
    fn emit(&self, event: HostEvent) -> bool {
        self.send_event(event).is_ok()
    }
}
