//! Edaview - client console for a remote exploratory data analysis service
//!
//! Edaview talks to an EDA backend that profiles database tables and returns
//! a mapping of named result sections: embedded SVG charts, report URLs, and
//! arbitrary structured values. The backend's schema is not known ahead of
//! time; edaview decides per section how to display it.
//!
//! # Overview
//!
//! Two entry points share one renderer and one request state machine:
//!
//! - **Fetch**: one GET against the results feed, rendered into an HTML or
//!   JSON report file.
//! - **Serve**: a local web console that collects connection parameters
//!   (host, port, username, password, database, table), POSTs them to the
//!   backend, and renders the profiling dump plus three embedded report
//!   viewers.
//!
//! # Rendering rules
//!
//! For each `(key, value)` entry, in mapping order:
//!
//! 1. A string opening an `<svg` tag is trusted markup, injected unescaped.
//!    The backend is assumed non-adversarial.
//! 2. Everything else is pretty-printed as indented JSON in a `<pre>` block.
//!
//! # Request lifecycle
//!
//! Every user-triggered action is exactly one round trip. The view is always
//! in one of four states: no data, loading, error, or data present. Responses
//! carry a generation ticket; a response from a superseded request is
//! discarded instead of overwriting a newer one.
//!
//! # Quick Start
//!
//! ```no_run
//! use edaview::{AnalysisClient, Endpoints};
//!
//! let client = AnalysisClient::new(Endpoints::resolve(None, None))?;
//! let results = client.fetch_results()?;
//!
//! for section in edaview::render::sections(&results) {
//!     println!("{}", section.title);
//! }
//! # Ok::<(), edaview::ClientError>(())
//! ```
//!
//! # Modules
//!
//! - [`render`]: the markup-vs-text decision procedure
//! - [`state`]: view-state machine with the stale-response guard
//! - [`client`]: HTTP client for the two backend endpoints
//! - [`report`]: HTML/JSON report output
//! - [`serve`]: interactive web console

pub mod client;
pub mod config;
pub mod render;
pub mod report;
pub mod serve;
pub mod state;

pub use client::{AnalysisClient, AnalysisReport, AnalysisRequest, ClientError};
pub use config::Endpoints;
pub use render::{classify, sections, ResultSet, Section, SectionBody};
pub use state::{Orchestrator, Ticket, ViewState};
