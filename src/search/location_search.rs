use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info};

use super::{
    camera::{CameraCommand, CameraSettings, MapView},
    state::{Key, KeyOutcome, QueryChange, RequestTicket, SearchState, MAX_RESULTS},
};
use crate::{
    services::geocoding_client::geocoding_service::Geocoder, types::search_result::SearchResult,
};

pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub debounce: Duration,
    pub max_results: usize,
    pub camera: CameraSettings,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_INTERVAL,
            max_results: MAX_RESULTS,
            camera: CameraSettings::default(),
        }
    }
}

/// Type-ahead place search driving a map camera.
///
/// At most one debounce timer is pending at a time; replacing it or dropping
/// the component cancels it. Lookups that already started are left to finish
/// and their results are dropped if a newer query exists by then.
///
/// Must be used from within a tokio runtime.
pub struct LocationSearch {
    state: Arc<Mutex<SearchState>>,
    geocoder: Arc<dyn Geocoder>,
    map: Arc<dyn MapView>,
    config: SearchConfig,
    pending: Option<DropGuard>,
}

impl LocationSearch {
    pub fn new(geocoder: Arc<dyn Geocoder>, map: Arc<dyn MapView>, config: SearchConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(SearchState::new(config.max_results))),
            geocoder,
            map,
            config,
            pending: None,
        }
    }

    /// Read access to the current display state.
    pub fn read<R>(&self, f: impl FnOnce(&SearchState) -> R) -> R {
        f(&self.state.lock())
    }

    pub fn on_query_change(&mut self, text: &str) {
        let change = self.state.lock().set_query(text);

        // dropping the guard cancels the previous timer
        self.pending = None;

        let QueryChange::Debounce { text, ticket } = change else {
            return;
        };

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let state = self.state.clone();
        let geocoder = self.geocoder.clone();
        let delay = self.config.debounce;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    debug!("Debounce timer for {:?} cancelled", text);
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            on_debounce_fire(state, geocoder, text, ticket).await;
        });

        self.pending = Some(token.drop_guard());
    }

    /// Returns whether the key was consumed.
    pub fn on_key_down(&mut self, key: Key) -> bool {
        let outcome = self.state.lock().key_down(key);

        match outcome {
            KeyOutcome::Ignored => false,
            KeyOutcome::Handled => true,
            KeyOutcome::Select(result) => {
                self.select_result(&result);
                true
            }
        }
    }

    pub fn on_hover(&mut self, index: usize) {
        self.state.lock().hover(index);
    }

    /// Issues exactly one camera command for `result`, then resets the box.
    pub fn select_result(&mut self, result: &SearchResult) -> CameraCommand {
        let command = CameraCommand::for_result(result, &self.config.camera);
        command.issue(self.map.as_ref());
        info!("Moving camera to {} ({})", result.label, result.id);

        self.pending = None;
        self.state.lock().finish_selection();

        command
    }

    pub fn on_blur_outside(&mut self) {
        self.state.lock().blur_outside();
    }

    pub fn on_focus(&mut self) {
        self.state.lock().focus();
    }
}

async fn on_debounce_fire(
    state: Arc<Mutex<SearchState>>,
    geocoder: Arc<dyn Geocoder>,
    text: String,
    ticket: RequestTicket,
) {
    let started = state.lock().begin_request(ticket);
    if !started {
        debug!("Skipping superseded lookup for {:?}", text);
        return;
    }

    let outcome = geocoder.search_places(&text).await;

    state.lock().apply_response(ticket, outcome);
}
