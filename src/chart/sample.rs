//! Built-in sample chart options.

/// Accumulated waterfall chart shown on startup, as a JavaScript object
/// expression.
pub const WATERFALL_OPTION: &str =
    include_str!("../../assets/options/waterfall.js");
