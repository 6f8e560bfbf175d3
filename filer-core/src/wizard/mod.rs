//! The guided filing wizard: pure transitions over [`FilingState`], a
//! store-backed session, and the milestone notifier.
//!
//! [`FilingState`]: crate::FilingState

mod error;
mod machine;
mod milestone;
mod session;

pub use error::WizardError;
pub use machine::FilingAction;
pub use milestone::{Milestone, MilestoneNotifier};
pub use session::{FILING_STATE_KEY, FilingSession};
