//! Fixed script snippets the host evaluates in the chart page.

use crate::bridge::{js_string, HOST_GLOBAL};

/// Page expression for the live ECharts instance.
pub const CHART_INSTANCE: &str = "window.__echartsHost.chart";

/// Subscribes to series clicks and forwards the clicked datum through
/// `Messenger` as a `showToast` message.
///
/// Replaces any click handler from a previous run so re-wiring after a
/// theme switch attaches exactly one listener.
pub const CLICK_TO_NOTICE_JS: &str = r"
(function() {
    var chart = window.__echartsHost.chart;
    if (!chart) { return; }
    chart.off('click');
    chart.on('click', 'series', function(params) {
        Messenger.postMessage(JSON.stringify({
            type: 'showToast',
            payload: params.data
        }));
    });
})();
void(0);
";

/// Re-create the chart instance under theme `name`.
#[must_use]
pub fn set_theme_script(name: &str) -> String {
    format!("{HOST_GLOBAL}.setTheme({}); void(0);", js_string(name))
}

/// Apply `option`, a JavaScript object expression, to the chart.
#[must_use]
pub fn set_option_script(option: &str) -> String {
    format!("{HOST_GLOBAL}.setOption(({option}\n)); void(0);")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_wiring_targets_messenger_and_chart() {
        assert!(CLICK_TO_NOTICE_JS.contains(CHART_INSTANCE));
        assert!(CLICK_TO_NOTICE_JS.contains("Messenger.postMessage"));
        assert!(CLICK_TO_NOTICE_JS.contains("type: 'showToast'"));
        assert!(CLICK_TO_NOTICE_JS.contains("chart.on('click', 'series'"));
    }

    #[test]
    fn theme_name_is_quoted() {
        assert_eq!(
            set_theme_script("dark"),
            r#"window.__echartsHost.setTheme("dark"); void(0);"#
        );
        assert!(set_theme_script("x'); alert(1); ('").starts_with(
            r#"window.__echartsHost.setTheme("x'); alert(1); ('")"#
        ));
    }

    #[test]
    fn option_is_wrapped_as_expression() {
        assert_eq!(
            set_option_script("{ series: [] }"),
            "window.__echartsHost.setOption(({ series: [] }\n)); void(0);"
        );
    }
}
