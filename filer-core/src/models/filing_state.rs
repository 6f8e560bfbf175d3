use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::SubStepData;
use super::step_kind::{StepKind, SubStepKind};

/// Smallest unit of data entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubStep {
    pub kind: SubStepKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(default)]
    pub data: SubStepData,
}

impl SubStep {
    pub fn new(kind: SubStepKind) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            description: None,
            completed: false,
            data: SubStepData::new(),
        }
    }

    /// Names of required fields that are absent or blank.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        self.kind
            .fields()
            .iter()
            .filter(|spec| spec.required)
            .filter(|spec| self.data.get(spec.name).is_none_or(|v| v.is_blank()))
            .map(|spec| spec.name)
            .collect()
    }
}

/// Ordered group of sub-steps sharing a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub title: String,
    pub description: String,
    pub sub_steps: Vec<SubStep>,
    pub completed: bool,
}

impl Step {
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            sub_steps: kind.sub_steps().iter().copied().map(SubStep::new).collect(),
            completed: false,
        }
    }

    pub(crate) fn recompute_completed(&mut self) {
        self.completed = self.sub_steps.iter().all(|s| s.completed);
    }

    pub fn completed_sub_steps(&self) -> usize {
        self.sub_steps.iter().filter(|s| s.completed).count()
    }
}

/// Aggregate root of the filing wizard.
///
/// Fields are only written by wizard transitions, so the current position
/// always addresses an existing sub-step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingState {
    pub(crate) current_step_index: usize,
    pub(crate) current_sub_step_index: usize,
    pub(crate) steps: Vec<Step>,
    pub(crate) started_at: Option<DateTime<Utc>>,
    pub(crate) last_updated: Option<DateTime<Utc>>,
    pub(crate) submitted: bool,
}

/// Lightweight view of wizard position for dashboard consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// 1-based index of the current step.
    pub current_step: usize,
    pub total_steps: usize,
    pub progress_percentage: u8,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for FilingState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilingState {
    /// Fresh wizard built from the static step skeleton.
    pub fn new() -> Self {
        Self {
            current_step_index: 0,
            current_sub_step_index: 0,
            steps: StepKind::ALL.into_iter().map(Step::new).collect(),
            started_at: None,
            last_updated: None,
            submitted: false,
        }
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn current_sub_step_index(&self) -> usize {
        self.current_sub_step_index
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Set by the first data update; cleared only by reset.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Re-derives every step's `completed` flag from its sub-steps.
    pub(crate) fn recompute_completion(&mut self) {
        for step in &mut self.steps {
            step.recompute_completed();
        }
    }

    pub fn current_step(&self) -> &Step {
        &self.steps[self.current_step_index]
    }

    pub fn current_sub_step(&self) -> &SubStep {
        &self.current_step().sub_steps[self.current_sub_step_index]
    }

    pub fn total_sub_steps(&self) -> usize {
        self.steps.iter().map(|s| s.sub_steps.len()).sum()
    }

    pub fn completed_sub_steps(&self) -> usize {
        self.steps.iter().map(Step::completed_sub_steps).sum()
    }

    /// `round(100 * completed / total)`, half rounding up.
    pub fn progress_percentage(&self) -> u8 {
        let total = self.total_sub_steps();
        if total == 0 {
            return 0;
        }
        let completed = self.completed_sub_steps();
        ((200 * completed + total) / (2 * total)) as u8
    }

    /// Position of the current sub-step counting across all steps.
    pub fn flat_index(&self) -> usize {
        self.steps[..self.current_step_index]
            .iter()
            .map(|s| s.sub_steps.len())
            .sum::<usize>()
            + self.current_sub_step_index
    }

    pub fn is_first_position(&self) -> bool {
        self.current_step_index == 0 && self.current_sub_step_index == 0
    }

    pub fn is_last_position(&self) -> bool {
        self.current_step_index + 1 == self.steps.len()
            && self.current_sub_step_index + 1 == self.current_step().sub_steps.len()
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_last_position()
    }

    pub fn can_go_previous(&self) -> bool {
        !self.is_first_position()
    }

    pub fn progress_summary(&self) -> ProgressSummary {
        ProgressSummary {
            current_step: self.current_step_index + 1,
            total_steps: self.steps.len(),
            progress_percentage: self.progress_percentage(),
            last_updated: self.last_updated,
        }
    }

    /// Whether `(step, sub_step)` addresses an existing sub-step.
    pub fn is_valid_position(&self, step: usize, sub_step: usize) -> bool {
        self.steps
            .get(step)
            .is_some_and(|s| sub_step < s.sub_steps.len())
    }
}
