use crate::error::HostError;

/// One-shot continuation receiving a script's result string.
pub type ScriptCallback = Box<dyn FnOnce(String) + Send + 'static>;

/// The embedded control that runs page script and navigates.
///
/// [`ChartView`](super::ChartView) is written against this trait so the
/// bridge logic runs without a window; the `gui` feature implements it for
/// [`wry::WebView`].
pub trait ScriptHost {
    /// Run `script` in the page, discarding its result.
    fn evaluate_script(&self, script: &str) -> Result<(), HostError>;

    /// Run `script` in the page; `callback` receives the result once the
    /// evaluation completes. The callback may run on a script thread.
    fn evaluate_script_with_callback(
        &self,
        script: &str,
        callback: ScriptCallback,
    ) -> Result<(), HostError>;

    /// Replace the current page with `url`.
    fn load_url(&self, url: &str) -> Result<(), HostError>;
}

#[cfg(feature = "gui")]
impl ScriptHost for wry::WebView {
    fn evaluate_script(&self, script: &str) -> Result<(), HostError> {
        Ok(Self::evaluate_script(self, script)?)
    }

    fn evaluate_script_with_callback(
        &self,
        script: &str,
        callback: ScriptCallback,
    ) -> Result<(), HostError> {
        // wry wants `Fn`; the slot makes the one-shot contract explicit.
        let slot = std::sync::Mutex::new(Some(callback));
        Self::evaluate_script_with_callback(self, script, move |result| {
            let callback = slot.lock().ok().and_then(|mut slot| slot.take());
            if let Some(callback) = callback {
                callback(result);
            }
        })?;
        Ok(())
    }

    fn load_url(&self, url: &str) -> Result<(), HostError> {
        Ok(Self::load_url(self, url)?)
    }
}
