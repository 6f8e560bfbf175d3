use thiserror::Error;

use crate::models::{FieldKind, SubStepKind};

/// Errors raised by wizard transitions. Navigation at a boundary is a no-op,
/// never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("sub-step '{}' has no field named '{field}'", .sub_step.id())]
    UnknownField {
        sub_step: SubStepKind,
        field: String,
    },

    #[error("field '{field}' expects a {expected:?} value")]
    FieldTypeMismatch { field: String, expected: FieldKind },

    #[error("no sub-step at position ({step}, {sub_step})")]
    PositionOutOfRange { step: usize, sub_step: usize },

    #[error("filing has already been submitted")]
    AlreadySubmitted,
}
