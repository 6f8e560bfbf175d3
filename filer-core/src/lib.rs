pub mod calculations;
pub mod models;
pub mod store;
pub mod wizard;

pub use calculations::{annualize_monthly, calculate_tax};
pub use models::*;
pub use store::{StateStore, StoreError};
pub use wizard::{FilingAction, FilingSession, Milestone, MilestoneNotifier, WizardError};
