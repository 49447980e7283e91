//! Native-side GUI layer: wry webviews hosting the chart page and the
//! notice overlay.
//!
//! Both webviews are children of the winit window. The chart webview
//! serves the bundled pages over a custom protocol and forwards every IPC
//! envelope to the host event sink.

/// Notice overlay webview.
pub mod toast;
/// Chart webview creation, asset protocol and IPC handler.
pub mod webview;
