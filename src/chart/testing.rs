//! In-memory [`ScriptHost`] for tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use super::{ChartView, PageLoad, ScriptCallback, ScriptHost};
use crate::bridge::ScriptEvent;
use crate::error::HostError;

/// Records every script and navigation; evaluation callbacks stay pending
/// until a test completes them.
#[derive(Default)]
pub(crate) struct FakeHost {
    evaluated: RefCell<Vec<String>>,
    loads: RefCell<Vec<String>>,
    callbacks: RefCell<VecDeque<(String, ScriptCallback)>>,
    /// Bumped by every navigation and every in-page reload.
    document: Cell<u32>,
    fail: Cell<bool>,
}

impl FakeHost {
    /// A host whose every operation fails.
    pub(crate) fn failing() -> Self {
        let host = Self::default();
        host.fail.set(true);
        host
    }

    /// Scripts evaluated so far, in order.
    pub(crate) fn evaluated(&self) -> Vec<String> {
        self.evaluated.borrow().clone()
    }

    /// Forget recorded scripts.
    pub(crate) fn clear(&self) {
        self.evaluated.borrow_mut().clear();
    }

    /// URL of the latest navigation.
    pub(crate) fn last_url(&self) -> Option<String> {
        self.loads.borrow().last().cloned()
    }

    /// The page replaces its document without a host navigation.
    pub(crate) fn reload_document(&self) {
        self.document.set(self.document.get() + 1);
    }

    /// Evaluations still waiting for their result callback.
    pub(crate) fn pending_callbacks(&self) -> usize {
        self.callbacks.borrow().len()
    }

    /// Complete the oldest pending evaluation with `result`, returning its
    /// script.
    pub(crate) fn complete_next(&self, result: &str) -> Option<String> {
        let (script, callback) = self.callbacks.borrow_mut().pop_front()?;
        callback(result.to_owned());
        Some(script)
    }

    /// Complete every pending evaluation.
    pub(crate) fn complete_all(&self) {
        while self.complete_next("null").is_some() {}
    }

    fn check(&self) -> Result<(), HostError> {
        if self.fail.get() {
            Err(HostError::Webview("fake host failure".into()))
        } else {
            Ok(())
        }
    }
}

impl ScriptHost for FakeHost {
    fn evaluate_script(&self, script: &str) -> Result<(), HostError> {
        self.check()?;
        self.evaluated.borrow_mut().push(script.to_owned());
        Ok(())
    }

    fn evaluate_script_with_callback(
        &self,
        script: &str,
        callback: ScriptCallback,
    ) -> Result<(), HostError> {
        self.check()?;
        self.evaluated.borrow_mut().push(script.to_owned());
        self.callbacks
            .borrow_mut()
            .push_back((script.to_owned(), callback));
        Ok(())
    }

    fn load_url(&self, url: &str) -> Result<(), HostError> {
        self.check()?;
        self.loads.borrow_mut().push(url.to_owned());
        self.document.set(self.document.get() + 1);
        Ok(())
    }
}

/// Deliver the ready envelope the current document would post.
pub(crate) fn report_ready(view: &mut ChartView<FakeHost>) {
    if let Some(event) = ready_event(view) {
        let _ = view.handle_script_event(event);
    }
}

/// The current page reloads itself (same URL, new document) and reports
/// ready again.
pub(crate) fn report_reloaded(
    view: &mut ChartView<FakeHost>,
) -> Option<PageLoad> {
    view.host().reload_document();
    let event = ready_event(view)?;
    view.handle_script_event(event)
}

/// The ready envelope the current document would post.
pub(crate) fn ready_event(view: &ChartView<FakeHost>) -> Option<ScriptEvent> {
    let href = view.host().last_url()?;
    let document = Some(format!("doc-{}", view.host().document.get()));
    Some(ScriptEvent::Ready { href, document })
}
