//! Store-backed wizard session.
//!
//! Every operation applies a pure transition and then writes the whole
//! [`FilingState`] under [`FILING_STATE_KEY`]. When the store fails the session
//! keeps working in memory and reports the problem via
//! [`FilingSession::storage_warning`].

use chrono::Utc;
use tracing::{debug, info, warn};

use super::error::WizardError;
use super::machine::FilingAction;
use crate::models::{FilingState, ProgressSummary, SubStepData};
use crate::store::{StateStore, StoreError};

pub const FILING_STATE_KEY: &str = "filing_state";

pub struct FilingSession {
    store: Box<dyn StateStore>,
    state: FilingState,
    storage_warning: Option<String>,
}

impl FilingSession {
    /// Loads the persisted filing, or starts a fresh one when nothing is
    /// stored or the stored document cannot be read.
    pub async fn open(store: Box<dyn StateStore>) -> Self {
        let mut session = Self {
            store,
            state: FilingState::new(),
            storage_warning: None,
        };

        match session.load().await {
            Ok(Some(state)) => {
                debug!(
                    step = state.current_step_index,
                    sub_step = state.current_sub_step_index,
                    "resumed filing"
                );
                session.state = state;
            }
            Ok(None) => debug!("no saved filing, starting fresh"),
            Err(error) => session.degrade("load", error),
        }

        session
    }

    async fn load(&self) -> Result<Option<FilingState>, StoreError> {
        let Some(json) = self.store.read(FILING_STATE_KEY).await? else {
            return Ok(None);
        };
        let mut state: FilingState = serde_json::from_str(&json)?;
        if !state.is_valid_position(state.current_step_index, state.current_sub_step_index) {
            return Err(StoreError::Serialization(format!(
                "saved position ({}, {}) is outside the wizard",
                state.current_step_index, state.current_sub_step_index
            )));
        }
        state.recompute_completion();
        Ok(Some(state))
    }

    pub fn state(&self) -> &FilingState {
        &self.state
    }

    pub fn store(&self) -> &dyn StateStore {
        self.store.as_ref()
    }

    pub fn progress_summary(&self) -> ProgressSummary {
        self.state.progress_summary()
    }

    /// Set once persistence has failed; the session is memory-only from then on.
    pub fn storage_warning(&self) -> Option<&str> {
        self.storage_warning.as_deref()
    }

    pub fn is_persistent(&self) -> bool {
        self.storage_warning.is_none()
    }

    /// Applies `action` and persists the result if the state changed.
    pub async fn dispatch(&mut self, action: FilingAction) -> Result<&FilingState, WizardError> {
        let is_reset = matches!(action, FilingAction::Reset);
        let next = self.state.apply(action, Utc::now())?;
        if next == self.state && !is_reset {
            return Ok(&self.state);
        }
        self.state = next;

        if is_reset {
            info!("filing reset");
            self.clear_persisted().await;
        } else {
            self.persist().await;
        }
        Ok(&self.state)
    }

    pub async fn update_sub_step_data(&mut self, data: SubStepData) -> Result<(), WizardError> {
        self.dispatch(FilingAction::UpdateSubStepData(data)).await.map(drop)
    }

    pub async fn complete_sub_step(&mut self) -> Result<(), WizardError> {
        self.dispatch(FilingAction::CompleteSubStep).await.map(drop)
    }

    pub async fn go_to_next(&mut self) {
        let _ = self.dispatch(FilingAction::GoToNext).await;
    }

    pub async fn go_to_previous(&mut self) {
        let _ = self.dispatch(FilingAction::GoToPrevious).await;
    }

    pub async fn go_to_step(&mut self, step: usize, sub_step: usize) -> Result<(), WizardError> {
        self.dispatch(FilingAction::GoToStep { step, sub_step })
            .await
            .map(drop)
    }

    pub async fn submit_filing(&mut self) {
        let _ = self.dispatch(FilingAction::Submit).await;
        info!(
            progress = self.state.progress_percentage(),
            "filing submitted"
        );
    }

    pub async fn reset_filing(&mut self) {
        let _ = self.dispatch(FilingAction::Reset).await;
    }

    async fn persist(&mut self) {
        if !self.is_persistent() {
            return;
        }
        let result = match serde_json::to_string(&self.state) {
            Ok(json) => self.store.write(FILING_STATE_KEY, &json).await,
            Err(e) => Err(e.into()),
        };
        if let Err(error) = result {
            self.degrade("write", error);
        }
    }

    /// Runs even in memory-only mode; a successful reset makes the session
    /// persistent again.
    async fn clear_persisted(&mut self) {
        match self.store.reset(FILING_STATE_KEY).await {
            Ok(()) => {
                if let Some(warning) = self.storage_warning.take() {
                    info!(previous = %warning, "filing storage available again");
                }
            }
            Err(error) => self.degrade("reset", error),
        }
    }

    fn degrade(&mut self, operation: &str, error: StoreError) {
        warn!(operation, %error, "filing storage unavailable, continuing in memory only");
        self.storage_warning = Some(format!(
            "Progress is not being saved ({operation} failed: {error})"
        ));
    }
}
