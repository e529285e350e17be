//! Forecast fetch lifecycle.
//!
//! `Idle -> Loading -> (Succeeded | Failed)`. Both outcomes are terminal for
//! that request; starting a new request begins a new generation.

/// Phase of the current forecast request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl FetchPhase {
    pub fn is_loading(self) -> bool {
        matches!(self, FetchPhase::Loading)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, FetchPhase::Succeeded | FetchPhase::Failed)
    }

    /// State after a request is issued.
    pub fn on_start(self) -> Self {
        FetchPhase::Loading
    }

    /// State after a response arrives. Only a loading request can complete.
    pub fn on_complete(self, ok: bool) -> Self {
        match (self, ok) {
            (FetchPhase::Loading, true) => FetchPhase::Succeeded,
            (FetchPhase::Loading, false) => FetchPhase::Failed,
            (other, _) => other,
        }
    }
}

/// Tracks the latest request so late responses from superseded requests are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTracker {
    phase: FetchPhase,
    generation: u64,
}

impl FetchTracker {
    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Generation of the most recently started request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new request and return its generation.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.phase = self.phase.on_start();
        self.generation
    }

    /// Record a completion. Returns `false` (and changes nothing) if
    /// `generation` is not the latest request.
    pub fn complete(&mut self, generation: u64, ok: bool) -> bool {
        if generation != self.generation || !self.phase.is_loading() {
            return false;
        }
        self.phase = self.phase.on_complete(ok);
        true
    }
}
