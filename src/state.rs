//! View-state machine around one network round trip
//!
//! Four mutually exclusive display states: no data yet, request in flight,
//! request failed, data present. Loading takes precedence while a request is
//! outstanding; an error never coexists with stale data.
//!
//! Responses are matched against a monotonically increasing request
//! generation. If a second request starts before the first resolves, the
//! first one's late response is discarded instead of overwriting the newer
//! request's outcome.

use log::debug;

/// What the UI should show right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    /// No request has completed yet (initial state).
    NoData,
    /// A request is outstanding.
    Loading,
    /// The last completed request failed; holds the user-facing message.
    Error(String),
    /// The last completed request succeeded.
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Opaque handle tying a response back to the request that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Owns the view state and the request generation counter.
///
/// One round trip per user-triggered action: callers `begin()` when they
/// fire the request and `resolve()` with the outcome. There is no retry and
/// no queueing; a newer `begin` simply supersedes the older ticket.
#[derive(Debug)]
pub struct Orchestrator<T> {
    generation: u64,
    state: ViewState<T>,
}

impl<T> Default for Orchestrator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Orchestrator<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: ViewState::NoData,
        }
    }

    /// Start a request: bump the generation, clear any previous error, show
    /// loading. The returned ticket must be handed back to [`resolve`].
    ///
    /// [`resolve`]: Orchestrator::resolve
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = ViewState::Loading;
        Ticket(self.generation)
    }

    /// Complete a request. Returns `true` if the outcome was applied,
    /// `false` if the ticket was superseded and the outcome discarded.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                "discarding stale response (request {} superseded by {})",
                ticket.0, self.generation
            );
            return false;
        }
        self.state = match outcome {
            Ok(payload) => ViewState::Ready(payload),
            Err(message) => ViewState::Error(message),
        };
        true
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }
}
