mod field;
mod filing_state;
mod step_kind;
mod tax_slab;
mod tax_year;

pub use field::{FieldKind, FieldSpec, FieldValue, ParseFieldValueError, SubStepData};
pub use filing_state::{FilingState, ProgressSummary, Step, SubStep};
pub use step_kind::{StepKind, SubStepKind};
pub use tax_slab::{ScheduleError, TaxSchedule, TaxSlab};
pub use tax_year::{ParseTaxYearError, TaxYear};
