//! Pure state transitions of the filing wizard.
//!
//! [`FilingState::apply`] never touches storage; callers persist the state it
//! returns. `now` is injected so transitions stay deterministic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::WizardError;
use crate::models::{FilingState, SubStepData};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilingAction {
    /// Shallow-merge fields into the current sub-step.
    UpdateSubStepData(SubStepData),
    CompleteSubStep,
    GoToNext,
    GoToPrevious,
    GoToStep { step: usize, sub_step: usize },
    Submit,
    Reset,
}

impl FilingState {
    pub fn apply(&self, action: FilingAction, now: DateTime<Utc>) -> Result<FilingState, WizardError> {
        debug!(?action, step = self.current_step_index, sub_step = self.current_sub_step_index, "apply");
        match action {
            FilingAction::UpdateSubStepData(data) => self.update_sub_step_data(data, now),
            FilingAction::CompleteSubStep => self.complete_sub_step(now),
            FilingAction::GoToNext => Ok(self.go_to_next(now)),
            FilingAction::GoToPrevious => Ok(self.go_to_previous(now)),
            FilingAction::GoToStep { step, sub_step } => self.go_to_step(step, sub_step, now),
            FilingAction::Submit => Ok(self.submit(now)),
            FilingAction::Reset => Ok(FilingState::new()),
        }
    }

    fn update_sub_step_data(
        &self,
        data: SubStepData,
        now: DateTime<Utc>,
    ) -> Result<FilingState, WizardError> {
        if self.submitted {
            return Err(WizardError::AlreadySubmitted);
        }

        let kind = self.current_sub_step().kind;
        for (name, value) in &data {
            let spec = kind.field(name).ok_or_else(|| WizardError::UnknownField {
                sub_step: kind,
                field: name.clone(),
            })?;
            if !spec.kind.accepts(value) {
                return Err(WizardError::FieldTypeMismatch {
                    field: name.clone(),
                    expected: spec.kind,
                });
            }
        }

        let mut next = self.clone();
        let sub_step = &mut next.steps[self.current_step_index].sub_steps[self.current_sub_step_index];
        sub_step.data.extend(data);
        next.last_updated = Some(now);
        next.started_at.get_or_insert(now);
        Ok(next)
    }

    fn complete_sub_step(&self, now: DateTime<Utc>) -> Result<FilingState, WizardError> {
        if self.submitted {
            return Err(WizardError::AlreadySubmitted);
        }

        let mut next = self.clone();
        let step = &mut next.steps[self.current_step_index];
        step.sub_steps[self.current_sub_step_index].completed = true;
        step.recompute_completed();
        next.last_updated = Some(now);
        Ok(next)
    }

    fn go_to_next(&self, now: DateTime<Utc>) -> FilingState {
        let last_sub_step = self.current_sub_step_index + 1 >= self.current_step().sub_steps.len();
        let last_step = self.current_step_index + 1 >= self.steps.len();

        match (last_sub_step, last_step) {
            (true, true) => self.clone(),
            (true, false) => self.moved_to(self.current_step_index + 1, 0, now),
            (false, _) => self.moved_to(self.current_step_index, self.current_sub_step_index + 1, now),
        }
    }

    fn go_to_previous(&self, now: DateTime<Utc>) -> FilingState {
        if self.current_sub_step_index > 0 {
            return self.moved_to(self.current_step_index, self.current_sub_step_index - 1, now);
        }
        if self.current_step_index == 0 {
            return self.clone();
        }

        let previous = self.current_step_index - 1;
        let last_sub_step = self.steps[previous].sub_steps.len().saturating_sub(1);
        self.moved_to(previous, last_sub_step, now)
    }

    fn go_to_step(
        &self,
        step: usize,
        sub_step: usize,
        now: DateTime<Utc>,
    ) -> Result<FilingState, WizardError> {
        if !self.is_valid_position(step, sub_step) {
            return Err(WizardError::PositionOutOfRange { step, sub_step });
        }
        Ok(self.moved_to(step, sub_step, now))
    }

    fn submit(&self, now: DateTime<Utc>) -> FilingState {
        FilingState {
            submitted: true,
            last_updated: Some(now),
            ..self.clone()
        }
    }

    fn moved_to(&self, step: usize, sub_step: usize, now: DateTime<Utc>) -> FilingState {
        FilingState {
            current_step_index: step,
            current_sub_step_index: sub_step,
            last_updated: Some(now),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{FieldKind, FieldValue, SubStepKind};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 10, minute, 0).unwrap()
    }

    fn data(pairs: &[(&str, FieldValue)]) -> SubStepData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn walk_to_end(mut state: FilingState) -> FilingState {
        for _ in 1..state.total_sub_steps() {
            state = state.apply(FilingAction::GoToNext, at(1)).unwrap();
        }
        state
    }

    // =========================================================================
    // updateSubStepData
    // =========================================================================

    #[test]
    fn update_merges_into_existing_data() {
        let state = FilingState::new()
            .apply(
                FilingAction::UpdateSubStepData(data(&[("fullName", "Ayesha Khan".into())])),
                at(0),
            )
            .unwrap()
            .apply(
                FilingAction::UpdateSubStepData(data(&[("city", "Lahore".into())])),
                at(1),
            )
            .unwrap();

        assert_eq!(
            state.current_sub_step().data,
            data(&[("fullName", "Ayesha Khan".into()), ("city", "Lahore".into())])
        );
    }

    #[test]
    fn update_overwrites_existing_key() {
        let state = FilingState::new()
            .apply(
                FilingAction::UpdateSubStepData(data(&[("city", "Lahore".into())])),
                at(0),
            )
            .unwrap()
            .apply(
                FilingAction::UpdateSubStepData(data(&[("city", "Karachi".into())])),
                at(1),
            )
            .unwrap();

        assert_eq!(state.current_sub_step().data["city"], FieldValue::from("Karachi"));
    }

    #[test]
    fn started_at_is_set_once_and_last_updated_tracks_latest() {
        let first = FilingState::new()
            .apply(
                FilingAction::UpdateSubStepData(data(&[("city", "Quetta".into())])),
                at(0),
            )
            .unwrap();
        let second = first
            .apply(
                FilingAction::UpdateSubStepData(data(&[("ntn", "1234567".into())])),
                at(5),
            )
            .unwrap();

        assert_eq!(second.started_at, Some(at(0)));
        assert_eq!(second.last_updated, Some(at(5)));
    }

    #[test]
    fn navigation_does_not_start_the_filing() {
        let state = FilingState::new().apply(FilingAction::GoToNext, at(0)).unwrap();

        assert_eq!(state.started_at, None);
        assert_eq!(state.last_updated, Some(at(0)));
    }

    #[test]
    fn update_rejects_unknown_field() {
        let err = FilingState::new()
            .apply(
                FilingAction::UpdateSubStepData(data(&[("salary", dec!(1).into())])),
                at(0),
            )
            .unwrap_err();

        assert_eq!(
            err,
            WizardError::UnknownField {
                sub_step: SubStepKind::BasicInfo,
                field: "salary".to_string(),
            }
        );
    }

    #[test]
    fn update_rejects_wrong_value_shape() {
        let state = FilingState::new().apply(FilingAction::GoToNext, at(0)).unwrap();

        let err = state
            .apply(
                FilingAction::UpdateSubStepData(data(&[("annualSalary", "a lot".into())])),
                at(1),
            )
            .unwrap_err();

        assert_eq!(
            err,
            WizardError::FieldTypeMismatch {
                field: "annualSalary".to_string(),
                expected: FieldKind::Number,
            }
        );
    }

    #[test]
    fn rejected_update_changes_nothing() {
        let state = FilingState::new();
        let batch = data(&[("city", "Multan".into()), ("bogus", "x".into())]);

        assert!(state.apply(FilingAction::UpdateSubStepData(batch), at(0)).is_err());
        assert_eq!(state, FilingState::new());
    }

    // =========================================================================
    // completeSubStep
    // =========================================================================

    #[test]
    fn completing_single_sub_step_completes_its_step() {
        let state = FilingState::new()
            .apply(FilingAction::CompleteSubStep, at(0))
            .unwrap();

        assert!(state.steps[0].sub_steps[0].completed);
        assert!(state.steps[0].completed);
    }

    #[test]
    fn step_completes_only_after_every_sub_step() {
        let mut state = FilingState::new()
            .apply(FilingAction::GoToStep { step: 3, sub_step: 0 }, at(0))
            .unwrap();

        for i in 0..4 {
            assert!(!state.steps[3].completed, "completed early at sub-step {i}");
            state = state
                .apply(FilingAction::CompleteSubStep, at(1))
                .unwrap()
                .apply(FilingAction::GoToNext, at(1))
                .unwrap();
        }

        assert!(state.steps[3].completed);
    }

    #[test]
    fn completing_everything_reaches_one_hundred_percent() {
        let mut state = FilingState::new();
        loop {
            state = state.apply(FilingAction::CompleteSubStep, at(0)).unwrap();
            if state.is_last_position() {
                break;
            }
            state = state.apply(FilingAction::GoToNext, at(0)).unwrap();
        }

        assert_eq!(state.progress_percentage(), 100);
        assert!(state.steps.iter().all(|s| s.completed));
    }

    #[test]
    fn completing_twice_is_idempotent() {
        let once = FilingState::new().apply(FilingAction::CompleteSubStep, at(0)).unwrap();
        let twice = once.apply(FilingAction::CompleteSubStep, at(0)).unwrap();

        assert_eq!(once, twice);
    }

    // =========================================================================
    // navigation
    // =========================================================================

    #[test]
    fn next_walks_sub_steps_then_steps() {
        let state = FilingState::new().apply(FilingAction::GoToNext, at(0)).unwrap();
        assert_eq!((state.current_step_index, state.current_sub_step_index), (1, 0));

        let state = state.apply(FilingAction::GoToNext, at(0)).unwrap();
        assert_eq!((state.current_step_index, state.current_sub_step_index), (1, 1));
    }

    #[test]
    fn walking_total_minus_one_reaches_the_end() {
        let state = walk_to_end(FilingState::new());

        assert!(state.is_last_position());
        assert_eq!(state.current_sub_step().kind, SubStepKind::FbrLogin);
    }

    #[test]
    fn next_at_end_is_a_no_op() {
        let end = walk_to_end(FilingState::new());

        let again = end.apply(FilingAction::GoToNext, at(30)).unwrap();

        assert_eq!(again, end);
    }

    #[test]
    fn previous_at_start_is_a_no_op() {
        let state = FilingState::new();

        assert_eq!(state.apply(FilingAction::GoToPrevious, at(0)).unwrap(), state);
    }

    #[test]
    fn previous_crosses_into_last_sub_step_of_previous_step() {
        let state = FilingState::new()
            .apply(FilingAction::GoToStep { step: 2, sub_step: 0 }, at(0))
            .unwrap()
            .apply(FilingAction::GoToPrevious, at(1))
            .unwrap();

        assert_eq!((state.current_step_index, state.current_sub_step_index), (1, 8));
        assert_eq!(state.current_sub_step().kind, SubStepKind::OtherIncome);
    }

    #[test]
    fn previous_mirrors_next() {
        let start = FilingState::new()
            .apply(FilingAction::GoToStep { step: 4, sub_step: 10 }, at(0))
            .unwrap();

        let round_trip = start
            .apply(FilingAction::GoToNext, at(0))
            .unwrap()
            .apply(FilingAction::GoToPrevious, at(0))
            .unwrap();

        assert_eq!(
            (round_trip.current_step_index, round_trip.current_sub_step_index),
            (4, 10)
        );
    }

    #[test]
    fn go_to_step_allows_jumping_ahead() {
        let state = FilingState::new()
            .apply(FilingAction::GoToStep { step: 6, sub_step: 3 }, at(0))
            .unwrap();

        assert_eq!(state.current_sub_step().kind, SubStepKind::DeductedSummary);
        assert_eq!(state.flat_index(), 30);
    }

    #[test]
    fn go_to_step_rejects_out_of_range() {
        let state = FilingState::new();

        assert_eq!(
            state.apply(FilingAction::GoToStep { step: 0, sub_step: 1 }, at(0)),
            Err(WizardError::PositionOutOfRange { step: 0, sub_step: 1 })
        );
        assert_eq!(
            state.apply(FilingAction::GoToStep { step: 8, sub_step: 0 }, at(0)),
            Err(WizardError::PositionOutOfRange { step: 8, sub_step: 0 })
        );
    }

    // =========================================================================
    // submit / reset
    // =========================================================================

    #[test]
    fn submit_is_terminal_for_data_edits() {
        let state = FilingState::new().apply(FilingAction::Submit, at(9)).unwrap();

        assert!(state.submitted);
        assert_eq!(state.last_updated, Some(at(9)));
        assert_eq!(
            state.apply(FilingAction::CompleteSubStep, at(10)),
            Err(WizardError::AlreadySubmitted)
        );
        assert_eq!(
            state.apply(
                FilingAction::UpdateSubStepData(data(&[("city", "Sukkur".into())])),
                at(10)
            ),
            Err(WizardError::AlreadySubmitted)
        );
    }

    #[test]
    fn reset_restores_initial_skeleton() {
        let state = FilingState::new()
            .apply(
                FilingAction::UpdateSubStepData(data(&[("city", "Peshawar".into())])),
                at(0),
            )
            .unwrap()
            .apply(FilingAction::CompleteSubStep, at(1))
            .unwrap()
            .apply(FilingAction::GoToStep { step: 5, sub_step: 0 }, at(2))
            .unwrap()
            .apply(FilingAction::Submit, at(3))
            .unwrap();

        let reset = state.apply(FilingAction::Reset, at(4)).unwrap();

        assert_eq!(reset, FilingState::new());
        assert_eq!(
            serde_json::to_string(&reset).unwrap(),
            serde_json::to_string(&FilingState::new()).unwrap()
        );
    }
}
