use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Global under which the bootstrap script installs its page-side helpers.
pub const HOST_GLOBAL: &str = "window.__echartsHost";

/// An IPC envelope posted by page script through `window.ipc.postMessage`.
///
/// Wry exposes a single IPC entry point, so every page-to-host channel
/// shares it and is told apart by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// The page finished mounting its chart and is safe to command.
    Ready {
        /// `location.href` of the page, carrying the load epoch fragment.
        href: String,
        /// Id unique to this document, so a page that reloads itself under
        /// the same URL is told apart from a repeated signal.
        #[serde(default)]
        document: Option<String>,
    },
    /// A call to `window[interface].postMessage(message)`.
    Post {
        /// Name the page called through.
        interface: String,
        /// Raw argument, `null` when the page passed `null`/`undefined`.
        #[serde(default)]
        message: Option<String>,
    },
    /// A key pressed while the page had focus, as `KeyboardEvent.code`.
    Key {
        /// Physical key code, e.g. `"KeyN"`.
        code: String,
    },
}

impl ScriptEvent {
    /// Decode an IPC request body.
    pub fn decode(body: &str) -> Result<Self, HostError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Script that installs a named interface object into the page.
///
/// After it runs, `window.<name>.postMessage(raw)` forwards `raw` to the
/// host as a [`ScriptEvent::Post`] and returns nothing.
#[must_use]
pub fn expose_interface_script(name: &str) -> String {
    format!("{HOST_GLOBAL}.expose({});", js_string(name))
}

/// Quote a Rust string as a JavaScript string literal.
#[must_use]
pub fn js_string(s: &str) -> String {
    // JSON string literals are valid JavaScript string literals, except for
    // the two line separators JSON leaves unescaped.
    serde_json::to_string(s)
        .unwrap_or_default()
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// JavaScript injected before every page load.
///
/// Keeps the chart instance, the active theme and the last option on the
/// page side so a theme switch can dispose and re-create the chart. Pages
/// call `mount(element)` once `echarts` is loaded; mounting reports
/// readiness to the host.
pub const BOOTSTRAP_JS: &str = r#"
(function() {
    if (window.__echartsHost) { return; }

    function send(envelope) {
        window.ipc.postMessage(JSON.stringify(envelope));
    }

    var host = { chart: null, element: null, theme: null, option: null };
    var documentId = String(performance.timeOrigin) + '-'
        + Math.random().toString(36).slice(2);

    host.init = function() {
        if (host.chart) { host.chart.dispose(); }
        host.chart = echarts.init(host.element, host.theme);
        if (host.option) { host.chart.setOption(host.option, true); }
        return host.chart;
    };

    host.mount = function(element) {
        host.element = element;
        host.init();
        window.addEventListener('resize', function() {
            if (host.chart) { host.chart.resize(); }
        });
        send({ kind: 'ready', href: location.href, document: documentId });
    };

    host.setTheme = function(name) {
        host.theme = name;
        host.init();
    };

    host.setOption = function(option) {
        host.option = option;
        if (host.chart) { host.chart.setOption(option, true); }
    };

    // Keys pressed inside the page never reach the native window.
    window.addEventListener('keydown', function(e) {
        if (!e.repeat) { send({ kind: 'key', code: e.code }); }
    });

    host.expose = function(name) {
        window[name] = Object.freeze({
            postMessage: function(raw) {
                send({
                    kind: 'post',
                    interface: name,
                    message: raw == null ? null : String(raw)
                });
            }
        });
    };

    window.__echartsHost = host;
})();
"#;
