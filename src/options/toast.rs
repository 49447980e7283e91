use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Toast", inline)]
#[serde(default)]
/// Transient notice overlay.
pub struct ToastOptions {
    /// How long a notice stays visible, in milliseconds.
    #[schemars(title = "Duration (ms)", range(min = 500, max = 10000))]
    pub duration_ms: u64,
    /// Overlay width in logical pixels.
    #[schemars(title = "Width", range(min = 120, max = 800))]
    pub width: u32,
    /// Overlay height in logical pixels.
    #[schemars(title = "Height", range(min = 32, max = 200))]
    pub height: u32,
    /// Gap between the overlay and the bottom window edge.
    #[schemars(title = "Bottom Margin")]
    pub bottom_margin: u32,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            width: 360,
            height: 48,
            bottom_margin: 48,
        }
    }
}

impl ToastOptions {
    /// Visible duration.
    #[must_use]
    pub fn duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.duration_ms)
    }
}
