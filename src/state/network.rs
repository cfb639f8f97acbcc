use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use chrono::{DateTime, Utc};
use log::{debug, error};
use stands_api::client::{ApiError, ErrorKind, FootballApi};
use stands_api::clubs::{list_favourite_clubs, list_nearby_clubs};
use stands_api::favourites::MemoryFavourites;
use stands_api::resolve::FixtureResolver;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Everything a request task needs. Shared between concurrently running requests.
struct Shared {
    resolver: FixtureResolver<FootballApi>,
    latitude: f64,
    longitude: f64,
    reference_now: Option<DateTime<Utc>>,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: AtomicUsize,
    spinner_running: AtomicBool,
}

pub struct NetworkWorker {
    shared: Arc<Shared>,
    requests: mpsc::Receiver<NetworkRequest>,
}

impl NetworkWorker {
    pub fn new(
        settings: &AppSettings,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        let shared = Shared {
            resolver: FixtureResolver::new(settings.api(), settings.resolver.clone()),
            latitude: settings.latitude,
            longitude: settings.longitude,
            reference_now: settings.reference_now,
            responses,
            in_flight: AtomicUsize::new(0),
            spinner_running: AtomicBool::new(false),
        };
        Self { shared: Arc::new(shared), requests }
    }

    /// Each request runs as its own task, so a slow fixture lookup never holds up the next one.
    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            if self.shared.responses.is_closed() {
                break;
            }
            Shared::start_loading_animation(&self.shared).await;

            let shared = self.shared.clone();
            tokio::spawn(async move {
                let response = match shared.handle(request).await {
                    Ok(response) => response,
                    Err(message) => NetworkResponse::Error { message },
                };
                let is_ok = match &response {
                    NetworkResponse::Error { .. } => false,
                    NetworkResponse::FixturesResolved { resolved, .. } => !resolved.is_error(),
                    _ => true,
                };

                debug!("network request complete");
                shared.stop_loading_animation(is_ok).await;

                if let Err(e) = shared.responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
            });
        }
    }
}

impl Shared {
    async fn handle(&self, request: NetworkRequest) -> Result<NetworkResponse, String> {
        match request {
            NetworkRequest::LocateClubs { token } => {
                debug!("locating clubs near {}, {} ({token:?})", self.latitude, self.longitude);
                let listing = list_nearby_clubs(
                    self.resolver.source(),
                    self.resolver.config(),
                    self.latitude,
                    self.longitude,
                )
                .await
                .map_err(|e| failure_message(&e, "clubs"))?;
                Ok(NetworkResponse::ClubsLoaded { token, listing })
            }
            NetworkRequest::LoadFavourites { token, ids } => {
                debug!("loading {} favourite club(s) ({token:?})", ids.len());
                let snapshot = MemoryFavourites::from(ids);
                let clubs = list_favourite_clubs(self.resolver.source(), &snapshot)
                    .await
                    .map_err(|e| failure_message(&e, "favourite clubs"))?;
                Ok(NetworkResponse::FavouritesLoaded { token, clubs })
            }
            NetworkRequest::ResolveFixtures { token, team_id } => {
                let now = self.reference_now.unwrap_or_else(Utc::now);
                debug!("resolving fixtures for team {team_id} ({token:?})");
                let resolved = self.resolver.resolve(team_id, now).await;
                Ok(NetworkResponse::FixturesResolved { token, team_id, resolved })
            }
        }
    }

    /// Only the first concurrent request starts the spinner, and at most one spinner task runs.
    async fn start_loading_animation(this: &Arc<Self>) {
        if this.in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
            return;
        }

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = this
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        // A spinner that has not noticed the idle gap yet keeps running for this request.
        if !claim_spinner(&this.spinner_running) {
            return;
        }

        let shared = this.clone();
        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if shared.in_flight.load(Ordering::SeqCst) == 0 {
                    shared.spinner_running.store(false, Ordering::SeqCst);
                    // A request may have started between the load and the store.
                    if shared.in_flight.load(Ordering::SeqCst) == 0
                        || !claim_spinner(&shared.spinner_running)
                    {
                        break;
                    }
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = shared
                    .responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        let was = self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if was > 1 && is_ok {
            return;
        }
        tokio::time::sleep(Duration::from_millis(15)).await;

        let still_loading = self.in_flight.load(Ordering::SeqCst) > 0;
        let spinner_char = match (is_ok, still_loading) {
            (false, _) => ERROR_CHAR,
            (true, true) => SPINNER_CHARS[0],
            (true, false) => ' ',
        };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: still_loading, spinner_char },
            })
            .await;
    }
}

/// True when the caller now owns the spinner task.
fn claim_spinner(running: &AtomicBool) -> bool {
    running.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_ok()
}

/// What the status line says when a listing call fails.
pub fn failure_message(err: &ApiError, what: &str) -> String {
    error!("{what} request failed: {err}");
    match err.kind() {
        ErrorKind::GeoLookupFailed => "Could not work out where you are.".to_string(),
        ErrorKind::ProviderUnavailable => format!("Could not load {what}. Please try again."),
    }
}
