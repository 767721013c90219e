//! Interactive web console
//!
//! `edaview serve` → starts a local server, opens the browser, shows the
//! connection form. Submitting the form triggers exactly one POST to the
//! analysis backend and renders the outcome.
//!
//! The console holds one shared view state behind the orchestrator, so
//! `/state` always reflects the latest request: no data, loading, error, or
//! the rendered multi-viewer report.

use crate::client::{AnalysisClient, AnalysisReport, AnalysisRequest};
use crate::report::html;
use crate::state::{Orchestrator, ViewState};
use log::info;
use std::io;
use std::sync::Mutex;
use tiny_http::{Header, Method, Request, Response, Server};

// Embed the UI directly in the binary
const UI_HTML: &str = include_str!("ui.html");

/// Start server, open browser, serve the console.
pub fn start(port: u16, client: AnalysisClient) -> io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let url = format!("http://localhost:{}", port);
    let backend = client.endpoints().analyze_url.clone();

    eprintln!("\n\x1b[1;32m📊 edaview\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   Backend: {}\n", backend);

    // Open browser
    let _ = open::that(&url);

    let console = Console {
        client,
        orchestrator: Mutex::new(Orchestrator::new()),
    };

    // Handle requests
    for request in server.incoming_requests() {
        if let Err(e) = console.handle(request) {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

struct Console {
    client: AnalysisClient,
    orchestrator: Mutex<Orchestrator<AnalysisReport>>,
}

impl Console {
    fn handle(&self, mut request: Request) -> io::Result<()> {
        let url = request.url().to_string();
        let path = url.split('?').next().unwrap_or("/");
        let method = request.method().clone();

        match (&method, path) {
            // Serve embedded form UI
            (&Method::Get, "/") => {
                let html = UI_HTML.replace("{{ANALYZE_URL}}", &self.client.endpoints().analyze_url);
                respond_html(request, html)
            }

            // Form submission: one backend round trip per submit
            (&Method::Post, "/analyze") => {
                let params = match parse_params(&mut request)? {
                    Some(params) => params,
                    None => {
                        let response = Response::from_string("Missing connection parameters")
                            .with_status_code(400);
                        return request.respond(response);
                    }
                };
                info!(
                    "analyze request for {}@{}:{}/{}",
                    params.username, params.host, params.port, params.database
                );

                let ticket = self.lock().begin();
                let outcome = self
                    .client
                    .analyze(&params)
                    .map_err(|e| e.user_message().to_string());
                self.lock().resolve(ticket, outcome);

                respond_html(request, self.state_page())
            }

            // Current view state (reload-safe)
            (&Method::Get, "/state") => respond_html(request, self.state_page()),

            // 404
            _ => {
                let response = Response::from_string("Not found").with_status_code(404);
                request.respond(response)
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Orchestrator<AnalysisReport>> {
        self.orchestrator
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state_page(&self) -> String {
        view_page(self.lock().state(), &self.client.endpoints().analyze_url)
    }
}

/// Render the page for the current view state. The four states are mutually
/// exclusive; stale data never shows next to an error.
fn view_page(state: &ViewState<AnalysisReport>, backend: &str) -> String {
    let body = match state {
        ViewState::NoData => html::message_body("No data available", false),
        ViewState::Loading => html::message_body("Loading...", false),
        ViewState::Error(message) => html::message_body(message, true),
        ViewState::Ready(report) => html::report_body(report),
    };
    let nav = "<div class=\"message\"><a href=\"/\" style=\"color: var(--accent)\">&larr; New analysis</a></div>\n";
    html::document(backend, &format!("{body}{nav}"))
}

fn parse_params(request: &mut Request) -> io::Result<Option<AnalysisRequest>> {
    let url = request.url().to_string();
    let query = url.split('?').nth(1).map(str::to_string);

    let mut body = String::new();
    request.as_reader().read_to_string(&mut body)?;

    Ok(decode_params(query.as_deref(), &body))
}

/// Accept the connection parameters as a query string, an urlencoded form
/// body, or a JSON body, in that order.
fn decode_params(query: Option<&str>, body: &str) -> Option<AnalysisRequest> {
    if let Some(query) = query {
        if let Ok(params) = serde_urlencoded::from_str::<AnalysisRequest>(query) {
            return Some(params);
        }
    }

    if !body.is_empty() {
        if let Ok(params) = serde_urlencoded::from_str::<AnalysisRequest>(body) {
            return Some(params);
        }
        if let Ok(params) = serde_json::from_str::<AnalysisRequest>(body) {
            return Some(params);
        }
    }

    None
}

fn respond_html(request: Request, html: String) -> io::Result<()> {
    let response = Response::from_string(html)
        .with_header(Header::from_bytes(&b"Content-Type"[..], &b"text/html"[..]).unwrap());
    request.respond(response)
}
