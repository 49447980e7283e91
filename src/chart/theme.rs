//! Chart themes known to the host.
//!
//! ECharts ships `"dark"`; other themes are static definition documents
//! that must be registered with `echarts.registerTheme` before use.

/// Built-in ECharts dark theme.
pub const DARK: &str = "dark";

/// The bundled light "wonderland" theme.
pub const WONDERLAND: &str = "wonderland";

/// Definition script for [`WONDERLAND`].
pub const WONDERLAND_JS: &str =
    include_str!("../../assets/themes/wonderland.js");

/// The definition script to register before applying `name`, or `None`
/// for themes ECharts provides itself.
#[must_use]
pub fn definition_script(name: &str) -> Option<&'static str> {
    match name {
        WONDERLAND => Some(WONDERLAND_JS),
        _ => None,
    }
}
