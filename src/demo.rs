//! The sample screen: a waterfall chart whose series clicks show a notice,
//! with day/night and bundled/network toggles.
//!
//! [`DemoApp`] holds no window types. The viewer feeds it key actions and
//! [`HostEvent`]s on the main thread and hands it a [`Notifier`] to show
//! notices on.

use crate::bridge::{EventSink, HostEvent, Messenger, ScriptEvent, MESSENGER};
use crate::chart::{
    sample, scripts, theme, ChartView, PageLoad, Resource, ScriptHost,
};
use crate::input::KeyAction;
use crate::notice::Notifier;
use crate::options::{DisplayMode, Options, ResourceMode};

/// Notice shown the first time the network page is selected.
pub const NETWORK_NOTICE: &str =
    "First network load of echarts.js may take a while";

/// Toggle state of the sample screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoState {
    /// Current day/night mode.
    pub display_mode: DisplayMode,
    /// Current page variant.
    pub resource_mode: ResourceMode,
    /// Whether [`NETWORK_NOTICE`] has been shown.
    pub network_notified: bool,
}

/// Wires the chart view to the sample's behaviour.
pub struct DemoApp<H, S> {
    chart: ChartView<H>,
    sink: S,
    options: Options,
    state: DemoState,
}

impl<H, S> DemoApp<H, S>
where
    H: ScriptHost,
    S: EventSink + Clone + Send + 'static,
{
    /// Create the app around `chart`. Nothing is loaded until
    /// [`start`](Self::start).
    pub fn new(chart: ChartView<H>, sink: S, options: Options) -> Self {
        let state = DemoState {
            display_mode: options.display.mode,
            resource_mode: options.resource.mode,
            network_notified: false,
        };
        Self {
            chart,
            sink,
            options,
            state,
        }
    }

    /// The chart view.
    pub fn chart(&self) -> &ChartView<H> {
        &self.chart
    }

    /// Current toggle state.
    pub fn state(&self) -> DemoState {
        self.state
    }

    /// Load the startup page, attach the click-to-notice wiring, apply the
    /// theme for the startup mode and set the sample option.
    pub fn start(&mut self) {
        let entry = self.options.resource.entry(self.state.resource_mode);
        self.chart.set_resource(Resource::parse(entry));
        self.chart.add_javascript_interface(
            MESSENGER,
            Messenger::new(self.sink.clone()),
        );
        self.wire_click_to_notice();
        self.apply_theme();
        self.chart.set_option(sample::WATERFALL_OPTION);
    }

    /// Flip day/night mode and re-theme the chart.
    pub fn toggle_display_mode(&mut self) {
        self.state.display_mode = self.state.display_mode.toggled();
        log::info!("display mode: {:?}", self.state.display_mode);
        self.apply_theme();
    }

    /// Flip between the bundled and network page.
    ///
    /// The network page may take a while on first load, so the first switch
    /// to it queues a one-time notice.
    pub fn toggle_resource(&mut self) {
        let mode = self.state.resource_mode.toggled();
        self.state.resource_mode = mode;
        let entry = self.options.resource.entry(mode);
        self.chart.set_resource(Resource::parse(entry));
        self.wire_click_to_notice();

        if mode == ResourceMode::Network && !self.state.network_notified {
            self.state.network_notified = true;
            emit(&self.sink, HostEvent::Notice(NETWORK_NOTICE.into()));
        }
    }

    /// Run a bound key action.
    pub fn execute(&mut self, action: KeyAction) {
        match action {
            KeyAction::ToggleNightMode => self.toggle_display_mode(),
            KeyAction::ToggleResource => self.toggle_resource(),
            KeyAction::Reload => {
                self.chart.reload();
                self.wire_click_to_notice();
            }
        }
    }

    /// Look up and run the action bound to `key`, if any.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match self.options.keybindings.lookup(key) {
            Some(action) => {
                self.execute(action);
                true
            }
            None => false,
        }
    }

    /// Apply one event on the main thread.
    pub fn handle_event(
        &mut self,
        event: HostEvent,
        notifier: &mut dyn Notifier,
    ) {
        match event {
            HostEvent::Script(ScriptEvent::Key { code }) => {
                let _ = self.handle_key(&code);
            }
            HostEvent::Script(event) => {
                let load = self.chart.handle_script_event(event);
                if matches!(load, Some(PageLoad::Reloaded(_))) {
                    // The replayed theme re-created the chart.
                    self.wire_click_to_notice();
                }
            }
            HostEvent::Notice(text) => notifier.show_notice(&text),
            HostEvent::ThemeRegistered(name) => {
                if name == self.current_theme() {
                    self.set_theme(name);
                } else {
                    log::debug!("theme {name} registered after mode change");
                }
            }
            HostEvent::ThemeApplied(name) => {
                log::info!("theme {name} applied");
                // The page re-created the chart; its listeners are gone.
                self.wire_click_to_notice();
            }
        }
    }

    fn current_theme(&self) -> &str {
        self.options.display.theme_for(self.state.display_mode)
    }

    /// Subscribe to series clicks once the page is ready.
    fn wire_click_to_notice(&mut self) {
        self.chart
            .once_ready(|view| view.run(scripts::CLICK_TO_NOTICE_JS));
    }

    /// Apply the current mode's theme, registering its definition first
    /// when ECharts does not ship it.
    fn apply_theme(&mut self) {
        let name = self.current_theme().to_owned();
        match theme::definition_script(&name) {
            Some(script) => {
                let sink = self.sink.clone();
                self.chart.register_theme_script(script, move || {
                    emit(&sink, HostEvent::ThemeRegistered(name));
                });
            }
            None => self.set_theme(name),
        }
    }

    fn set_theme(&mut self, name: String) {
        let sink = self.sink.clone();
        self.chart.set_theme(name.clone(), move || {
            emit(&sink, HostEvent::ThemeApplied(name));
        });
    }
}

/// Queue `event`, noting when the event loop is already gone.
fn emit(sink: &impl EventSink, event: HostEvent) {
    if !sink.emit(event) {
        log::debug!("host event dropped: event loop closed");
    }
}
