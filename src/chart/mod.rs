//! Host-to-page command channel for an embedded ECharts page.
//!
//! A [`ChartView`] wraps the embedded control (anything implementing
//! [`ScriptHost`]) and tracks the page lifecycle. Commands that depend on
//! the page runtime (themes, options, interface objects) are deferred until
//! the current load reports ready, and the view replays its theme, option
//! and interfaces into every newly loaded page before releasing deferred
//! actions.

mod host;
mod resource;
pub mod sample;
pub mod scripts;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;

pub use host::{ScriptCallback, ScriptHost};
pub use resource::{bundled_origin, Resource, BUNDLED_SCHEME};

use std::sync::{Arc, Mutex};

use crate::bridge::{
    expose_interface_script, Epoch, InterfaceTable, JavascriptInterface,
    LoadState, ReadyGate, ScriptEvent,
};

/// Continuation deferred until the page is ready.
type ReadyAction<H> = Box<dyn FnOnce(&mut ChartView<H>)>;

/// An embedded chart page and the commands the host can send it.
pub struct ChartView<H> {
    host: H,
    gate: ReadyGate<ReadyAction<H>>,
    interfaces: InterfaceTable,
    resource: Option<Resource>,
    /// Theme definition scripts registered so far, replayed on each load.
    theme_scripts: Vec<String>,
    /// Active theme name, replayed on each load.
    theme: Option<String>,
    /// Last chart option, replayed on each load.
    option: Option<String>,
    /// Document id of the page that reported ready for the current load.
    document: Option<String>,
}

/// A page that reported ready and received the view's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoad {
    /// The page requested by the latest navigation. Deferred actions ran.
    Initial(Epoch),
    /// A new document under the same load, e.g. a reload from the page
    /// itself. State was replayed; deferred actions had already run.
    Reloaded(Epoch),
}

// ── Construction ─────────────────────────────────────────────────────────

impl<H: ScriptHost> ChartView<H> {
    /// Wrap a control that has not loaded a chart page yet.
    ///
    /// Nothing is ready until [`set_resource`](Self::set_resource) loads a
    /// page and that page reports ready.
    pub fn new(host: H) -> Self {
        Self {
            host,
            gate: ReadyGate::new(),
            interfaces: InterfaceTable::new(),
            resource: None,
            theme_scripts: Vec::new(),
            theme: None,
            option: None,
            document: None,
        }
    }

    /// The wrapped control.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Lifecycle of the current load.
    pub fn state(&self) -> LoadState {
        self.gate.state()
    }

    /// Whether the current page has reported ready.
    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    /// The most recently requested page.
    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    /// The active theme, once one has been applied.
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }
}

// ── Script evaluation ────────────────────────────────────────────────────

impl<H: ScriptHost> ChartView<H> {
    /// Evaluate `script`; `on_result` fires once with its result string.
    ///
    /// If the host rejects the script, `on_result` fires right away with an
    /// empty string. `on_result` may run on the webview's script thread and
    /// must not touch UI state. Emit a
    /// [`HostEvent`](crate::bridge::HostEvent) instead.
    pub fn evaluate(
        &self,
        script: &str,
        on_result: impl FnOnce(String) + Send + 'static,
    ) {
        let on_result: ScriptCallback = Box::new(on_result);
        let slot = Arc::new(Mutex::new(Some(on_result)));
        let shared = Arc::clone(&slot);
        let callback: ScriptCallback = Box::new(move |result| {
            if let Some(on_result) = take_callback(&shared) {
                on_result(result);
            }
        });
        if let Err(e) =
            self.host.evaluate_script_with_callback(script, callback)
        {
            log::warn!("script evaluation failed: {e}");
            if let Some(on_result) = take_callback(&slot) {
                on_result(String::new());
            }
        }
    }

    /// Evaluate `script` without waiting for its result.
    pub fn run(&self, script: &str) {
        if let Err(e) = self.host.evaluate_script(script) {
            log::warn!("script evaluation failed: {e}");
        }
    }

    /// Run `action` once the current page is ready.
    ///
    /// Runs immediately if it already is. Actions registered while a page is
    /// loading run in registration order, exactly once, against the page
    /// that finally reports ready.
    pub fn once_ready(&mut self, action: impl FnOnce(&mut Self) + 'static) {
        if let Some(action) = self.gate.register(Box::new(action)) {
            action(self);
        }
    }
}

// ── Page commands ────────────────────────────────────────────────────────

impl<H: ScriptHost> ChartView<H> {
    /// Load `resource`, replacing the current page and re-arming the ready
    /// gate.
    pub fn set_resource(&mut self, resource: Resource) {
        let epoch = self.gate.rearm();
        self.document = None;
        let url = epoch.tag_url(&resource.url());
        log::info!("loading {resource} (epoch {epoch})");
        if let Err(e) = self.host.load_url(&url) {
            log::error!("failed to load {url}: {e}");
        }
        self.resource = Some(resource);
    }

    /// Load the current resource again.
    pub fn reload(&mut self) {
        if let Some(resource) = self.resource.clone() {
            self.set_resource(resource);
        }
    }

    /// Switch the chart to theme `name`; `on_applied` fires once the page
    /// has re-created the chart under it.
    ///
    /// Re-creating the chart drops listeners attached to the old instance.
    pub fn set_theme(
        &mut self,
        name: impl Into<String>,
        on_applied: impl FnOnce() + Send + 'static,
    ) {
        let name = name.into();
        self.once_ready(move |view| {
            view.evaluate(&scripts::set_theme_script(&name), move |_| {
                on_applied();
            });
            view.theme = Some(name);
        });
    }

    /// Evaluate a theme definition script, then fire `on_registered`.
    ///
    /// Registered scripts are replayed into every later page load.
    pub fn register_theme_script(
        &mut self,
        script: impl Into<String>,
        on_registered: impl FnOnce() + Send + 'static,
    ) {
        let script = script.into();
        self.once_ready(move |view| {
            view.evaluate(&script, move |_| on_registered());
            if !view.theme_scripts.contains(&script) {
                view.theme_scripts.push(script);
            }
        });
    }

    /// Apply a chart option (a JavaScript object expression).
    pub fn set_option(&mut self, option: impl Into<String>) {
        let option = option.into();
        self.once_ready(move |view| {
            view.run(&scripts::set_option_script(&option));
            view.option = Some(option);
        });
    }

    /// Expose `handler` to page script as `window.<name>`.
    ///
    /// The object is installed into the current page (once ready) and into
    /// every page loaded afterwards.
    pub fn add_javascript_interface(
        &mut self,
        name: impl Into<String>,
        handler: impl JavascriptInterface + 'static,
    ) {
        let name = name.into();
        if self.interfaces.insert(name.clone(), Box::new(handler)) {
            log::debug!("replaced interface {name:?}");
        }
        // Pages that are still loading get it from the ready replay.
        if self.is_ready() {
            self.run(&expose_interface_script(&name));
        }
    }
}

// ── Page events ──────────────────────────────────────────────────────────

impl<H: ScriptHost> ChartView<H> {
    /// Apply an envelope posted by the page.
    ///
    /// Returns the page load a `ready` envelope completed, if any.
    pub fn handle_script_event(
        &mut self,
        event: ScriptEvent,
    ) -> Option<PageLoad> {
        match event {
            ScriptEvent::Ready { href, document } => {
                match Epoch::from_href(&href) {
                    Some(epoch) => self.page_ready(epoch, document),
                    None => {
                        log::debug!("ready signal without epoch: {href}");
                        None
                    }
                }
            }
            ScriptEvent::Post { interface, message } => {
                let _ = self.interfaces.deliver(&interface, message.as_deref());
                None
            }
            ScriptEvent::Key { code } => {
                log::debug!("unhandled page key {code}");
                None
            }
        }
    }

    /// The page loaded under `epoch` reported ready.
    fn page_ready(
        &mut self,
        epoch: Epoch,
        document: Option<String>,
    ) -> Option<PageLoad> {
        if let Some(actions) = self.gate.mark_ready(epoch) {
            log::info!("page ready (epoch {epoch})");
            self.document = document;
            self.replay_page_state();
            for action in actions {
                action(self);
            }
            return Some(PageLoad::Initial(epoch));
        }

        let reloaded = self.gate.state() == LoadState::Ready(epoch)
            && document.is_some()
            && document != self.document;
        if !reloaded {
            log::debug!("ignoring stale ready signal for epoch {epoch}");
            return None;
        }
        log::info!("page reloaded itself (epoch {epoch}), replaying state");
        self.document = document;
        self.replay_page_state();
        Some(PageLoad::Reloaded(epoch))
    }

    /// Restore interfaces, registered themes, theme and option into a fresh
    /// page.
    fn replay_page_state(&self) {
        for name in self.interfaces.names() {
            self.run(&expose_interface_script(&name));
        }
        for script in &self.theme_scripts {
            self.run(script);
        }
        if let Some(theme) = &self.theme {
            self.run(&scripts::set_theme_script(theme));
        }
        if let Some(option) = &self.option {
            self.run(&scripts::set_option_script(option));
        }
    }
}

/// Take the one-shot callback out of its shared slot.
fn take_callback(
    slot: &Mutex<Option<ScriptCallback>>,
) -> Option<ScriptCallback> {
    slot.lock().ok().and_then(|mut slot| slot.take())
}

impl<H: ScriptHost> std::fmt::Debug for ChartView<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartView")
            .field("gate", &self.gate)
            .field("interfaces", &self.interfaces)
            .field("resource", &self.resource)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::testing::{report_ready, report_reloaded, FakeHost};
    use super::*;

    fn loaded_view() -> ChartView<FakeHost> {
        let mut view = ChartView::new(FakeHost::default());
        view.set_resource(Resource::parse("index_inner.html"));
        view
    }

    #[test]
    fn set_resource_tags_url_with_epoch() {
        let mut view = loaded_view();
        assert_eq!(view.state(), LoadState::Loading(Epoch(1)));
        let url = view.host().last_url().unwrap();
        assert!(url.ends_with("index_inner.html#epoch=1"));

        view.set_resource(Resource::parse("index.html"));
        let url = view.host().last_url().unwrap();
        assert!(url.ends_with("/index.html#epoch=2"));
        assert_eq!(
            view.resource(),
            Some(&Resource::Bundled("index.html".into()))
        );
    }

    #[test]
    fn once_ready_waits_for_ready_signal() {
        let mut view = loaded_view();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        view.once_ready(move |_| counter.set(counter.get() + 1));
        assert_eq!(fired.get(), 0);

        report_ready(&mut view);
        assert_eq!(fired.get(), 1);

        // Duplicate ready from the same page does not re-fire.
        report_ready(&mut view);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn late_once_ready_fires_immediately_without_refiring_earlier() {
        let mut view = loaded_view();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let a = Rc::clone(&first);
        view.once_ready(move |_| a.set(a.get() + 1));
        report_ready(&mut view);

        let b = Rc::clone(&second);
        view.once_ready(move |_| b.set(b.get() + 1));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn pending_action_fires_once_on_latest_resource() {
        let mut view = loaded_view();
        let stale_url = view.host().last_url().unwrap();
        let fired_on = Rc::new(Cell::new(None));
        let slot = Rc::clone(&fired_on);
        view.once_ready(move |view| slot.set(Some(view.state().epoch())));

        view.set_resource(Resource::parse("index.html"));

        // The superseded page finishes loading late.
        let stale = view.handle_script_event(ScriptEvent::Ready {
            href: stale_url,
            document: Some("first-page".into()),
        });
        assert_eq!(stale, None);
        assert_eq!(fired_on.get(), None);

        report_ready(&mut view);
        assert_eq!(fired_on.get(), Some(Epoch(2)));

        report_ready(&mut view);
        view.reload();
        report_ready(&mut view);
        assert_eq!(fired_on.get(), Some(Epoch(2)));
    }

    #[test]
    fn ready_signal_without_epoch_is_ignored() {
        let mut view = loaded_view();
        let load = view.handle_script_event(ScriptEvent::Ready {
            href: "echarts://localhost/index_inner.html".into(),
            document: None,
        });
        assert_eq!(load, None);
        assert!(!view.is_ready());
    }

    #[test]
    fn set_theme_fires_on_applied_after_evaluation() {
        let mut view = loaded_view();
        let applied = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&applied);
        view.set_theme("dark", move || {
            let _ = counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(view.host().pending_callbacks(), 0);

        report_ready(&mut view);
        assert_eq!(view.theme(), Some("dark"));
        assert_eq!(applied.load(Ordering::SeqCst), 0);

        let script = view.host().complete_next("null").unwrap();
        assert_eq!(script, scripts::set_theme_script("dark"));
        assert_eq!(applied.load(Ordering::SeqCst), 1);
        assert!(view.host().complete_next("null").is_none());
    }

    #[test]
    fn new_page_gets_interfaces_theme_and_option_before_actions() {
        let mut view = loaded_view();
        view.add_javascript_interface("Messenger", |_: Option<&str>| {});
        view.register_theme_script("registerWonderland()", || {});
        view.set_theme("wonderland", || {});
        view.set_option("{ series: [] }");
        report_ready(&mut view);
        view.host().complete_all();

        view.reload();
        view.host().clear();
        view.once_ready(|view| view.run("action()"));
        report_ready(&mut view);

        assert_eq!(
            view.host().evaluated(),
            vec![
                expose_interface_script("Messenger"),
                "registerWonderland()".to_owned(),
                scripts::set_theme_script("wonderland"),
                scripts::set_option_script("{ series: [] }"),
                "action()".to_owned(),
            ]
        );
    }

    #[test]
    fn theme_scripts_are_not_replayed_twice() {
        let mut view = loaded_view();
        report_ready(&mut view);
        view.register_theme_script("def()", || {});
        view.register_theme_script("def()", || {});
        view.host().complete_all();
        view.reload();
        view.host().clear();
        report_ready(&mut view);
        assert_eq!(view.host().evaluated(), vec!["def()".to_owned()]);
    }

    #[test]
    fn posts_route_to_registered_interface() {
        let mut view = loaded_view();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        view.add_javascript_interface("Counter", move |raw: Option<&str>| {
            if raw == Some("ping") {
                counter.set(counter.get() + 1);
            }
        });
        let _ = view.handle_script_event(ScriptEvent::Post {
            interface: "Counter".into(),
            message: Some("ping".into()),
        });
        let _ = view.handle_script_event(ScriptEvent::Post {
            interface: "Missing".into(),
            message: Some("ping".into()),
        });
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn host_failures_are_logged_not_fatal() {
        let mut view = ChartView::new(FakeHost::failing());
        view.set_resource(Resource::parse("index.html"));
        view.run("1");

        let results = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&results);
        view.evaluate("2", move |result| {
            if let Ok(mut seen) = seen.lock() {
                seen.push(result);
            }
        });
        assert_eq!(*results.lock().unwrap(), vec![String::new()]);
        assert_eq!(view.host().last_url(), None);
        assert_eq!(
            view.resource(),
            Some(&Resource::Bundled("index.html".into()))
        );
    }

    #[test]
    fn evaluate_result_fires_exactly_once() {
        let view = loaded_view();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        view.evaluate("1 + 1", move |result| {
            assert_eq!(result, "2");
            let _ = counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(view.host().complete_next("2").as_deref(), Some("1 + 1"));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn interface_added_after_ready_is_exposed_now() {
        let mut view = loaded_view();
        report_ready(&mut view);
        view.host().clear();

        view.add_javascript_interface("X", |_: Option<&str>| {});
        assert_eq!(view.host().evaluated(), vec![expose_interface_script("X")]);

        // A repeated ready signal does not install it again.
        report_ready(&mut view);
        assert_eq!(view.host().evaluated(), vec![expose_interface_script("X")]);
    }

    #[test]
    fn page_reloading_itself_gets_state_replayed() {
        let mut view = loaded_view();
        view.add_javascript_interface("Messenger", |_: Option<&str>| {});
        view.set_option("{ series: [] }");
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        view.once_ready(move |_| counter.set(counter.get() + 1));
        report_ready(&mut view);
        assert_eq!(fired.get(), 1);
        view.host().clear();

        // Same URL and epoch, new document.
        let load = report_reloaded(&mut view);
        assert_eq!(load, Some(PageLoad::Reloaded(Epoch(1))));
        assert_eq!(
            view.host().evaluated(),
            vec![
                expose_interface_script("Messenger"),
                scripts::set_option_script("{ series: [] }"),
            ]
        );
        assert_eq!(fired.get(), 1);

        // The reloaded document repeating itself is ignored.
        view.host().clear();
        report_ready(&mut view);
        assert!(view.host().evaluated().is_empty());
    }

    #[test]
    fn reload_before_first_ready_is_a_plain_load() {
        let mut view = loaded_view();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        view.once_ready(move |_| counter.set(counter.get() + 1));
        assert_eq!(
            report_reloaded(&mut view),
            Some(PageLoad::Initial(Epoch(1)))
        );
        assert_eq!(fired.get(), 1);
    }
}
