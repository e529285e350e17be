//! Routes user actions to the domain store and keeps the page in sync.
//!
//! Every action runs to completion before the next one: mutate, persist,
//! re-render the affected region. The forecast runs independently and only
//! ever writes the forecast region.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use shoreline_core::AppError;
use shoreline_forecast::{FetchPhase, FetchTracker, ForecastClient, ForecastDay, ForecastError};
use shoreline_store::{DomainStore, EventDraft, Rerender, Scope};

use crate::error_mapping::IntoAppError;
use crate::services::{request_forecast_fetch, ForecastMessage};
use crate::surface::{Region, Surface};
use crate::view;

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Roster form submitted
    AddCrew { name: String, role: String },
    /// Remove button on a crew card
    RemoveCrew(String),
    /// Event form submitted
    CreateEvent(EventDraft),
    /// "Join Squad" on an event card. Not wired to any state yet.
    JoinSquad(String),
}

pub struct Controller<S: Surface> {
    store: DomainStore,
    surface: S,
    forecast: FetchTracker,
    tx: Sender<ForecastMessage>,
    rx: Receiver<ForecastMessage>,
    storage_warning: Option<&'static str>,
}

impl<S: Surface> Controller<S> {
    /// Take ownership of the store and surface and render the roster and events.
    pub fn new(store: DomainStore, surface: S) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut controller = Self {
            store,
            surface,
            forecast: FetchTracker::default(),
            tx,
            rx,
            storage_warning: None,
        };
        controller.check_storage();
        controller.render(Scope::All);
        controller
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn forecast_phase(&self) -> FetchPhase {
        self.forecast.phase()
    }

    /// User-facing note about the last storage failure. Cleared by the next
    /// successful save.
    pub fn storage_warning(&self) -> Option<&'static str> {
        self.storage_warning
    }

    /// Process one action.
    ///
    /// # Errors
    /// `AppError::InvalidInput` when the action was rejected; nothing was
    /// mutated or rendered.
    pub fn handle(&mut self, action: Action) -> Result<(), AppError> {
        let rerender = match action {
            Action::AddCrew { name, role } => {
                match self.store.add_crew_member(&name, &role) {
                    Ok(rerender) => rerender,
                    Err(e) => {
                        tracing::debug!("Crew add skipped: {}", e);
                        return Err(e.into_app_error());
                    }
                }
            }
            Action::RemoveCrew(id) => self.store.remove_crew_member(&id),
            Action::CreateEvent(draft) => self.store.create_event(draft),
            Action::JoinSquad(id) => {
                tracing::info!(event_id = %id, "Join Squad pressed");
                return Ok(());
            }
        };

        self.apply(rerender);
        Ok(())
    }

    /// Enter `Loading` and show the placeholder. Returns the request generation.
    pub fn begin_forecast(&mut self) -> u64 {
        let generation = self.forecast.begin();
        self.surface.replace(Region::Forecast, view::forecast_loading());
        generation
    }

    /// Render a fetch result. Results from superseded requests are ignored;
    /// returns whether this one was applied.
    pub fn apply_forecast(
        &mut self,
        generation: u64,
        result: Result<Vec<ForecastDay>, ForecastError>,
    ) -> bool {
        if !self.forecast.complete(generation, result.is_ok()) {
            tracing::debug!(
                generation,
                latest = self.forecast.generation(),
                "Ignoring stale forecast response"
            );
            return false;
        }

        match result {
            Ok(days) => {
                self.surface.replace(Region::Forecast, view::forecast_grid(&days));
            }
            Err(e) => {
                let err = e.into_app_error();
                tracing::error!("Error fetching forecast: {}", err);
                self.surface
                    .replace(Region::Forecast, view::forecast_error(err.user_message()));
            }
        }
        true
    }

    /// Fetch and render the forecast inline.
    pub async fn refresh_forecast(&mut self, client: &ForecastClient) {
        let generation = self.begin_forecast();
        let result = client.fetch().await;
        self.apply_forecast(generation, result);
    }

    /// Start a fetch on `runtime`; the result arrives through [`Self::poll_messages`].
    pub fn request_forecast(
        &mut self,
        runtime: &tokio::runtime::Handle,
        client: Arc<ForecastClient>,
    ) -> u64 {
        let generation = self.begin_forecast();
        request_forecast_fetch(&self.tx, runtime, client, generation);
        generation
    }

    /// Apply every pending forecast message. Returns how many were applied.
    pub fn poll_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.rx.try_recv() {
            if self.on_message(msg) {
                applied += 1;
            }
        }
        applied
    }

    /// Block until the current forecast request settles or `timeout` passes.
    /// Returns whether it settled.
    pub fn wait_for_forecast(&mut self, timeout: Duration) -> bool {
        let deadline = std::time::Instant::now() + timeout;
        while self.forecast.phase().is_loading() {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(msg) => {
                    self.on_message(msg);
                }
                Err(_) => return false,
            }
        }
        true
    }

    fn on_message(&mut self, msg: ForecastMessage) -> bool {
        match msg {
            ForecastMessage::FetchDone { generation, result } => {
                self.apply_forecast(generation, result)
            }
        }
    }

    fn apply(&mut self, rerender: Rerender) {
        if rerender.persisted {
            self.storage_warning = None;
        } else {
            self.check_storage();
        }
        self.render(rerender.scope);
    }

    fn check_storage(&mut self) {
        if let Some(e) = self.store.take_error() {
            let err = e.into_app_error();
            tracing::warn!("{}", err);
            self.storage_warning = Some(err.user_message());
        }
    }

    fn render(&mut self, scope: Scope) {
        if matches!(scope, Scope::Crew | Scope::All) {
            self.surface
                .replace(Region::Roster, view::crew_list(self.store.crew()));
        }
        if matches!(scope, Scope::Events | Scope::All) {
            self.surface
                .replace(Region::Events, view::event_list(self.store.events()));
        }
    }
}
