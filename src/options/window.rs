use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Window", inline)]
#[serde(default)]
/// Host window and webview settings.
pub struct WindowOptions {
    /// Window title.
    #[schemars(title = "Title")]
    pub title: String,
    /// Let the window background show through the chart page.
    #[schemars(title = "Transparent Chart Background")]
    pub transparent: bool,
    /// Enable webview devtools.
    #[schemars(title = "Devtools")]
    pub devtools: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "ECharts Host".into(),
            transparent: true,
            devtools: false,
        }
    }
}
