//! Wry webview child of the winit window.
//!
//! Creates a [`wry::WebView`] covering the whole window, serves the bundled
//! chart pages via the `echarts://` custom protocol, injects the bridge
//! bootstrap script and forwards IPC envelopes to an [`EventSink`].

use std::borrow::Cow;

use rust_embed::RustEmbed;
use wry::http::{header::CONTENT_TYPE, Request, Response};
use wry::{dpi, Rect, WebView, WebViewBuilder};

use crate::bridge::{EventSink, HostEvent, ScriptEvent, BOOTSTRAP_JS};
use crate::chart::BUNDLED_SCHEME;
use crate::error::HostError;
use crate::options::WindowOptions;

/// Bundled chart pages, themes and `echarts.min.js`.
#[derive(RustEmbed)]
#[folder = "assets/web/"]
struct WebAssets;

/// Create the chart webview as a child of the given window.
///
/// No page is loaded yet; [`ChartView::set_resource`] does that.
///
/// [`ChartView::set_resource`]: crate::chart::ChartView::set_resource
pub fn create_chart_webview<W, S>(
    window: &W,
    window_width: u32,
    window_height: u32,
    sink: S,
    options: &WindowOptions,
) -> Result<WebView, HostError>
where
    W: wry::raw_window_handle::HasWindowHandle,
    S: EventSink + 'static,
{
    let webview = WebViewBuilder::new()
        .with_bounds(full_bounds(window_width, window_height))
        .with_transparent(options.transparent)
        .with_background_color((0, 0, 0, 0))
        .with_devtools(options.devtools)
        .with_custom_protocol(BUNDLED_SCHEME.into(), |_id, request| {
            serve_asset(request.uri().path())
        })
        .with_initialization_script(BOOTSTRAP_JS)
        .with_ipc_handler(move |req: Request<String>| {
            forward_envelope(req.body(), &sink);
        })
        .build_as_child(window)?;

    Ok(webview)
}

/// Bounds covering the full window.
#[must_use]
pub fn full_bounds(window_width: u32, window_height: u32) -> Rect {
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(0, 0)),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(
            window_width.max(1),
            window_height.max(1),
        )),
    }
}

// ── Internals ────────────────────────────────────────────────────────────

/// Decode an IPC body and queue it for the main thread.
fn forward_envelope(body: &str, sink: &impl EventSink) {
    match ScriptEvent::decode(body) {
        Ok(event) => {
            if !sink.emit(HostEvent::Script(event)) {
                log::debug!("IPC envelope dropped: event loop closed");
            }
        }
        Err(e) => log::warn!("dropping malformed IPC envelope: {e}"),
    }
}

/// Respond to a custom-protocol request for `path`.
fn serve_asset(path: &str) -> Response<Cow<'static, [u8]>> {
    // Default to index.html for the root path.
    let path = match path.trim_start_matches('/') {
        "" => "index.html",
        p => p,
    };

    match WebAssets::get(path) {
        Some(asset) => {
            let mime = mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string();
            Response::builder()
                .header(CONTENT_TYPE, mime)
                .body(asset.data)
                .unwrap_or_else(|_| Response::new(Cow::from(Vec::new())))
        }
        None => {
            log::warn!("no bundled asset at {path}");
            Response::builder()
                .status(404)
                .body(Cow::from(Vec::new()))
                .unwrap_or_else(|_| Response::new(Cow::from(Vec::new())))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn serves_bundled_pages() {
        let root = serve_asset("/");
        assert_eq!(root.status(), 200);
        assert_eq!(root.headers()[CONTENT_TYPE], "text/html");

        let inner = serve_asset("/index_inner.html");
        assert_eq!(inner.status(), 200);
        let body = String::from_utf8_lossy(inner.body());
        assert!(body.contains("echarts.min.js"));
        assert!(body.contains("__echartsHost.mount"));
    }

    #[test]
    fn missing_asset_is_404() {
        assert_eq!(serve_asset("/nope.js").status(), 404);
    }

    #[test]
    fn envelopes_are_forwarded_and_garbage_dropped() {
        let (tx, rx) = mpsc::channel();
        forward_envelope(r#"{"kind":"key","code":"KeyL"}"#, &tx);
        forward_envelope("not an envelope", &tx);
        drop(tx);
        assert_eq!(
            rx.iter().collect::<Vec<_>>(),
            vec![HostEvent::Script(ScriptEvent::Key {
                code: "KeyL".into()
            })]
        );
    }
}
