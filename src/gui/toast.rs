//! Transient notice overlay.
//!
//! A small transparent child webview centred near the bottom of the window.
//! It is hidden until a notice arrives and hidden again once the notice
//! expires.

use std::time::Instant;

use winit::window::Window;
use wry::{dpi, Rect, WebView, WebViewBuilder};

use crate::bridge::js_string;
use crate::error::HostError;
use crate::notice::{NoticeSlot, Notifier};
use crate::options::ToastOptions;

/// Owns the overlay webview and the visible notice.
pub struct ToastController {
    webview: WebView,
    slot: NoticeSlot,
    options: ToastOptions,
}

impl ToastController {
    /// Create the hidden overlay as a child of `window`.
    pub fn new(
        window: &Window,
        options: ToastOptions,
    ) -> Result<Self, HostError> {
        let webview = WebViewBuilder::new()
            .with_bounds(toast_bounds(window, &options))
            .with_transparent(true)
            .with_visible(false)
            .with_html(TOAST_HTML)
            .build_as_child(window)?;
        Ok(Self {
            webview,
            slot: NoticeSlot::default(),
            options,
        })
    }

    /// Re-centre after the window was resized.
    pub fn apply_layout(&self, window: &Window) {
        let _ = self.webview.set_bounds(toast_bounds(window, &self.options));
    }

    /// When the visible notice expires, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.slot.deadline()
    }

    /// Hide the overlay if its notice has expired by `now`.
    pub fn expire(&mut self, now: Instant) {
        if self.slot.expire(now) {
            let _ = self.webview.set_visible(false);
        }
    }
}

impl Notifier for ToastController {
    fn show_notice(&mut self, text: &str) {
        log::info!("notice: {text}");
        self.slot.show(text, Instant::now(), self.options.duration());
        let script = format!("window.showNotice({});", js_string(text));
        if let Err(e) = self.webview.evaluate_script(&script) {
            log::warn!("failed to show notice: {e}");
            return;
        }
        let _ = self.webview.set_visible(true);
    }
}

/// Overlay bounds: centred horizontally, `bottom_margin` above the bottom
/// edge, clamped to the window.
fn toast_bounds(window: &Window, options: &ToastOptions) -> Rect {
    let scale = window.scale_factor();
    let inner: dpi::LogicalSize<f64> = window.inner_size().to_logical(scale);
    let width = f64::from(options.width).min(inner.width);
    let height = f64::from(options.height).min(inner.height);
    let x = ((inner.width - width) / 2.0).max(0.0);
    let y = (inner.height - height - f64::from(options.bottom_margin)).max(0.0);
    Rect {
        position: dpi::Position::Logical(dpi::LogicalPosition::new(x, y)),
        size: dpi::Size::Logical(dpi::LogicalSize::new(width, height)),
    }
}

const TOAST_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
  html, body {
    margin: 0; height: 100%; background: transparent; overflow: hidden;
  }
  body { display: flex; align-items: center; justify-content: center; }
  #notice {
    max-width: 100%; box-sizing: border-box; padding: 10px 18px;
    border-radius: 20px; background: rgba(40, 40, 40, 0.88); color: #fff;
    font: 14px/1.4 system-ui, sans-serif; white-space: nowrap;
    overflow: hidden; text-overflow: ellipsis;
  }
</style>
</head>
<body>
<div id="notice"></div>
<script>
  window.showNotice = function(text) {
    document.getElementById('notice').textContent = text;
  };
</script>
</body>
</html>
"#;
