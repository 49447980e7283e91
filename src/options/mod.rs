//! Host configuration with TOML file support.
//!
//! Startup display and resource modes, themes, notice overlay, window and
//! keybindings are consolidated here. Every section uses
//! `#[serde(default)]` so a partial TOML file (e.g. only `[display]`)
//! works. Options are read once at startup; toggles made at runtime are
//! not written back.

mod display;
mod keybindings;
mod resource;
mod toast;
mod window;

use std::path::Path;

pub use display::{DisplayMode, DisplayOptions};
pub use keybindings::KeybindingOptions;
pub use resource::{ResourceMode, ResourceOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use toast::ToastOptions;
pub use window::WindowOptions;

use crate::error::HostError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Day/night mode and themes.
    pub display: DisplayOptions,
    /// Bundled and network entry pages.
    pub resource: ResourceOptions,
    /// Notice overlay.
    pub toast: ToastOptions,
    /// Window and webview.
    pub window: WindowOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the options file.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, HostError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| HostError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, HostError> {
        let content = std::fs::read_to_string(path).map_err(HostError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), HostError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HostError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(HostError::Io)?;
        }
        std::fs::write(path, content).map_err(HostError::Io)
    }
}
