//! Standalone chart window backed by winit.
//!
//! The window hosts two wry child webviews: the chart page covering the
//! whole window and a small notice overlay. Webview callbacks post
//! [`HostEvent`]s through the event loop proxy, so every state change
//! happens in [`ApplicationHandler::user_event`] on the main thread.
//!
//! ```no_run
//! # use echarts_host::Viewer;
//! Viewer::builder()
//!     .with_title("Waterfall")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    bridge::HostEvent,
    chart::ChartView,
    demo::DemoApp,
    error::HostError,
    gui::{toast::ToastController, webview},
    input::KeyAction,
    options::Options,
};

/// Upper bound on the wait between GTK pumps.
const GTK_TICK: Duration = Duration::from_millis(16);

type HostedDemo = DemoApp<wry::WebView, EventLoopProxy<HostEvent>>;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: Option<String>,
}

impl ViewerBuilder {
    /// Create a builder with default options and the configured title.
    fn new() -> Self {
        Self {
            options: None,
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title, overriding `[window] title`.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options.unwrap_or_default();
        if let Some(title) = self.title {
            options.window.title = title;
        }
        Viewer { options }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the sample chart.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), HostError> {
        #[cfg(target_os = "linux")]
        gtk::init().map_err(|e| HostError::Viewer(e.to_string()))?;

        let event_loop = EventLoop::<HostEvent>::with_user_event()
            .build()
            .map_err(|e| HostError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            proxy: event_loop.create_proxy(),
            options: self.options,
            window: None,
            demo: None,
            toast: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| HostError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    proxy: EventLoopProxy<HostEvent>,
    options: Options,
    window: Option<Window>,
    demo: Option<HostedDemo>,
    toast: Option<ToastController>,
}

impl ViewerApp {
    /// Create the chart webview and start the sample on it.
    fn start_demo(&self, window: &Window) -> Result<HostedDemo, HostError> {
        let inner = window.inner_size();
        let webview = webview::create_chart_webview(
            window,
            inner.width,
            inner.height,
            self.proxy.clone(),
            &self.options.window,
        )?;
        let mut demo = DemoApp::new(
            ChartView::new(webview),
            self.proxy.clone(),
            self.options.clone(),
        );
        demo.start();
        Ok(demo)
    }

    /// Keep both webviews sized to the window.
    fn apply_layout(&self) {
        let Some(ref window) = self.window else {
            return;
        };
        let inner = window.inner_size();
        if let Some(ref demo) = self.demo {
            let _ = demo
                .chart()
                .host()
                .set_bounds(webview::full_bounds(inner.width, inner.height));
        }
        if let Some(ref toast) = self.toast {
            toast.apply_layout(window);
        }
    }
}

impl ApplicationHandler<HostEvent> for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_sign_loss)]
            let logical_w = (f64::from(mon_size.width) / scale * 0.6) as u32;
            #[allow(clippy::cast_sign_loss)]
            let logical_h = (f64::from(mon_size.height) / scale * 0.6) as u32;
            Window::default_attributes()
                .with_title(&self.options.window.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.options.window.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => w,
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let demo = match self.start_demo(&window) {
            Ok(demo) => demo,
            Err(e) => {
                log::error!("Failed to create chart webview: {e}");
                event_loop.exit();
                return;
            }
        };

        // Created after the chart webview so it stacks on top.
        match ToastController::new(&window, self.options.toast.clone()) {
            Ok(toast) => self.toast = Some(toast),
            Err(e) => {
                log::error!("Failed to create notice overlay: {e}");
                // Continue without notices
            }
        }

        self.demo = Some(demo);
        self.window = Some(window);
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: HostEvent) {
        let Some(ref mut demo) = self.demo else {
            return;
        };
        match self.toast {
            Some(ref mut toast) => demo.handle_event(event, toast),
            None => demo.handle_event(event, &mut LogNotifier),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(_)
            | WindowEvent::ScaleFactorChanged { .. } => self.apply_layout(),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if let Some(ref mut demo) = self.demo {
                    let _ = demo.handle_key(&KeyAction::key_string(code));
                }
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // wry child webviews on Linux are GTK widgets; pump GTK here.
        #[cfg(target_os = "linux")]
        while gtk::events_pending() {
            let _ = gtk::main_iteration_do(false);
        }

        let deadline = self.toast.as_mut().and_then(|toast| {
            toast.expire(Instant::now());
            toast.deadline()
        });

        if cfg!(target_os = "linux") {
            // GTK needs regular pumping even without winit events.
            let tick = Instant::now() + GTK_TICK;
            let wake = deadline.map_or(tick, |d| d.min(tick));
            event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
        } else {
            event_loop.set_control_flow(
                deadline.map_or(ControlFlow::Wait, ControlFlow::WaitUntil),
            );
        }
    }
}

/// Fallback notifier when the overlay could not be created.
struct LogNotifier;

impl crate::notice::Notifier for LogNotifier {
    fn show_notice(&mut self, text: &str) {
        log::info!("notice: {text}");
    }
}
