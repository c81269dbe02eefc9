use tracing::{debug, warn};

use crate::{
    services::geocoding_client::types::geocoding_service_error::GeocodingServiceError,
    types::search_result::SearchResult,
};

pub const MAX_RESULTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

/// Identifies the query generation a lookup was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, PartialEq)]
pub enum QueryChange {
    /// Blank input: results were cleared, nothing to look up.
    Cleared,
    /// Lookup `text` once the debounce interval passes untouched.
    Debounce { text: String, ticket: RequestTicket },
}

#[derive(Debug, PartialEq)]
pub enum KeyOutcome {
    /// Not consumed; the text input should apply its default behavior.
    Ignored,
    Handled,
    Select(SearchResult),
}

#[derive(Debug, PartialEq)]
pub enum Dropdown<'a> {
    Hidden,
    NoResults,
    Results {
        items: &'a [SearchResult],
        selected: Option<usize>,
    },
}

/// Everything the search box displays, plus the request fence.
///
/// Invariants:
/// - `selected` is `None` or a valid index into `results`.
/// - `is_open` is false whenever `results` is empty.
/// - only a response carrying the current generation's ticket is applied.
#[derive(Debug)]
pub struct SearchState {
    query: String,
    results: Vec<SearchResult>,
    selected: Option<usize>,
    is_open: bool,
    is_loading: bool,
    no_results: bool,
    generation: u64,
    max_results: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(MAX_RESULTS)
    }
}

impl SearchState {
    pub fn new(max_results: usize) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            selected: None,
            is_open: false,
            is_loading: false,
            no_results: false,
            generation: 0,
            max_results,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn dropdown(&self) -> Dropdown<'_> {
        if self.is_open {
            Dropdown::Results {
                items: &self.results,
                selected: self.selected,
            }
        } else if self.no_results {
            Dropdown::NoResults
        } else {
            Dropdown::Hidden
        }
    }

    pub fn set_query(&mut self, text: &str) -> QueryChange {
        self.query = text.to_string();
        self.generation += 1;
        self.is_loading = false;
        self.no_results = false;

        if text.trim().is_empty() {
            self.clear_results();
            return QueryChange::Cleared;
        }

        QueryChange::Debounce {
            text: text.to_string(),
            ticket: RequestTicket(self.generation),
        }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Marks the lookup for `ticket` as in flight. Returns false if a newer
    /// query already superseded it.
    pub fn begin_request(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.is_loading = true;
        true
    }

    /// Applies a lookup outcome. Returns false when the response is stale.
    pub fn apply_response(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Vec<SearchResult>, GeocodingServiceError>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                generation = ticket.0,
                current = self.generation,
                "Discarding stale geocoding response"
            );
            return false;
        }

        self.is_loading = false;
        self.selected = None;

        match outcome {
            Ok(mut results) => {
                results.truncate(self.max_results);
                self.results = results;
            }
            Err(e) => {
                warn!("Geocoding lookup failed for {:?}: {}", self.query, e);
                self.results.clear();
            }
        }

        self.is_open = !self.results.is_empty();
        self.no_results = self.results.is_empty();
        true
    }

    pub fn key_down(&mut self, key: Key) -> KeyOutcome {
        if key == Key::Escape && self.no_results {
            self.no_results = false;
            return KeyOutcome::Handled;
        }

        if !self.is_open || self.results.is_empty() {
            return KeyOutcome::Ignored;
        }

        let last = self.results.len() - 1;

        match key {
            Key::ArrowDown => {
                self.selected = Some(match self.selected {
                    Some(i) => (i + 1).min(last),
                    None => 0,
                });
                KeyOutcome::Handled
            }
            Key::ArrowUp => {
                self.selected = match self.selected {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
                KeyOutcome::Handled
            }
            Key::Enter => match self.selected.and_then(|i| self.results.get(i)) {
                Some(result) => KeyOutcome::Select(result.clone()),
                None => KeyOutcome::Ignored,
            },
            Key::Escape => {
                self.is_open = false;
                self.selected = None;
                KeyOutcome::Handled
            }
            Key::Other => KeyOutcome::Ignored,
        }
    }

    pub fn hover(&mut self, index: usize) {
        if self.is_open && index < self.results.len() {
            self.selected = Some(index);
        }
    }

    /// Resets everything after a result was chosen. Any lookup still in
    /// flight becomes stale.
    pub fn finish_selection(&mut self) {
        self.query.clear();
        self.generation += 1;
        self.is_loading = false;
        self.no_results = false;
        self.clear_results();
    }

    pub fn blur_outside(&mut self) {
        self.is_open = false;
        self.no_results = false;
    }

    pub fn focus(&mut self) {
        if !self.results.is_empty() {
            self.is_open = true;
        }
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.selected = None;
        self.is_open = false;
    }
}
