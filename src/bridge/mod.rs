//! Message bridge between the host and the embedded page.
//!
//! **Page → host**: page script calls `window.<Name>.postMessage(raw)` on an
//! interface object installed by the host. The call is wrapped in a
//! [`ScriptEvent`] envelope, sent over wry IPC, and routed by name through
//! an [`InterfaceTable`]. [`Messenger`] decodes `raw` as a
//! [`BridgeMessage`].
//!
//! **Host → page**: see [`crate::chart::ChartView`]. Commands that need the
//! page's runtime wait on a [`ReadyGate`].
//!
//! Nothing here touches UI state. Handlers and script callbacks emit
//! [`HostEvent`]s into an [`EventSink`] and the main thread applies them.

mod envelope;
mod interface;
mod message;
mod ready;
mod sink;

pub use envelope::{
    expose_interface_script, js_string, ScriptEvent, BOOTSTRAP_JS, HOST_GLOBAL,
};
pub use interface::{InterfaceTable, JavascriptInterface, Messenger, MESSENGER};
pub use message::{BridgeMessage, Command, FALLBACK_NOTICE, SHOW_TOAST};
pub use ready::{Epoch, LoadState, ReadyGate};
pub use sink::{EventSink, HostEvent};
