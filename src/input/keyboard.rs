use serde::{Deserialize, Serialize};

/// Host actions that can be bound to keys.
///
/// These stand in for the two toggle switches of the sample screen plus a
/// reload. Serde serializes as `snake_case` strings so TOML files stay
/// readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_night_mode = "KeyN"
/// toggle_resource = "KeyL"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Flip between day and night display mode.
    ToggleNightMode,
    /// Flip between the bundled and the network chart page.
    ToggleResource,
    /// Reload the current chart page.
    Reload,
}

impl KeyAction {
    /// Key string for a winit physical key code, in the format bindings
    /// use (`"KeyN"`, `"F5"`).
    #[cfg(feature = "viewer")]
    #[must_use]
    pub fn key_string(code: winit::keyboard::KeyCode) -> String {
        format!("{code:?}")
    }
}
