//! Crate-level error types.

use std::fmt;

/// Errors produced by the echarts-host crate.
#[derive(Debug)]
pub enum HostError {
    /// A bridge message or IPC envelope was not valid JSON of the
    /// expected shape.
    Decode(serde_json::Error),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// The webview rejected a command (script evaluation, navigation).
    Webview(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "bridge decode error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Webview(msg) => write!(f, "webview error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HostError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e)
    }
}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(feature = "gui")]
impl From<wry::Error> for HostError {
    fn from(e: wry::Error) -> Self {
        Self::Webview(e.to_string())
    }
}
