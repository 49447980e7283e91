// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Native host for an ECharts page embedded in a wry webview.
//!
//! The host loads a bundled or network chart page, sends it JavaScript
//! commands (theme, option, interface objects) once the page reports
//! ready, and receives JSON [`bridge::BridgeMessage`]s posted by page
//! script through named interface objects.
//!
//! # Key entry points
//!
//! - [`chart::ChartView`] - host-to-page commands gated on page readiness
//! - [`bridge`] - message format, interface routing and the ready gate
//! - [`demo::DemoApp`] - the waterfall sample with day/night and
//!   bundled/network toggles
//! - [`options::Options`] - runtime configuration loaded from TOML
//! - `Viewer` - standalone winit window (`gui` feature)
//!
//! # Architecture
//!
//! Webview IPC handlers and script callbacks never touch host state. They
//! emit [`bridge::HostEvent`]s into an [`bridge::EventSink`]; in the
//! viewer that is the winit event loop proxy, so every event is applied on
//! the main thread. Each navigation starts a new load epoch and a ready
//! signal from a superseded page is ignored.

pub mod bridge;
pub mod chart;
pub mod demo;
pub mod error;
pub mod input;
pub mod notice;
pub mod options;

#[cfg(feature = "gui")]
pub mod gui;
#[cfg(feature = "gui")]
pub mod viewer;

pub use error::HostError;
#[cfg(feature = "gui")]
pub use viewer::Viewer;
