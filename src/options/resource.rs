use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the chart page gets the ECharts library from.
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
pub enum ResourceMode {
    /// Page using the bundled `echarts.min.js`.
    #[default]
    Bundled,
    /// Page fetching `echarts.min.js` from a CDN.
    Network,
}

impl ResourceMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Bundled => Self::Network,
            Self::Network => Self::Bundled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Resource", inline)]
#[serde(default)]
/// Entry pages for each resource mode.
pub struct ResourceOptions {
    /// Mode at startup.
    #[schemars(title = "Mode")]
    pub mode: ResourceMode,
    /// Bundled page (path) or URL used in bundled mode.
    #[schemars(title = "Bundled Entry")]
    pub bundled_entry: String,
    /// Bundled page (path) or URL used in network mode.
    #[schemars(title = "Network Entry")]
    pub network_entry: String,
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self {
            mode: ResourceMode::Bundled,
            bundled_entry: "index_inner.html".into(),
            network_entry: "index.html".into(),
        }
    }
}

impl ResourceOptions {
    /// Entry for `mode`.
    #[must_use]
    pub fn entry(&self, mode: ResourceMode) -> &str {
        match mode {
            ResourceMode::Bundled => &self.bundled_entry,
            ResourceMode::Network => &self.network_entry,
        }
    }
}
