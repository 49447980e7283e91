use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::chart::theme;

/// Day or night presentation.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Light chart theme.
    #[default]
    Day,
    /// Dark chart theme.
    Night,
}

impl DisplayMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Display mode and the chart theme used for each mode.
pub struct DisplayOptions {
    /// Mode at startup.
    #[schemars(title = "Mode")]
    pub mode: DisplayMode,
    /// Theme applied in day mode.
    #[schemars(title = "Day Theme")]
    pub day_theme: String,
    /// Theme applied in night mode.
    #[schemars(title = "Night Theme")]
    pub night_theme: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Day,
            day_theme: theme::WONDERLAND.to_owned(),
            night_theme: theme::DARK.to_owned(),
        }
    }
}

impl DisplayOptions {
    /// Theme name for `mode`.
    #[must_use]
    pub fn theme_for(&self, mode: DisplayMode) -> &str {
        match mode {
            DisplayMode::Day => &self.day_theme,
            DisplayMode::Night => &self.night_theme,
        }
    }
}
