//! Progressive tax calculation.
//!
//! [`calculate_tax`] evaluates the built-in slab schedule of a [`TaxYear`];
//! [`TaxSchedule::calculate`] evaluates any validated schedule, such as one
//! loaded from CSV.
//!
//! [`TaxYear`]: crate::TaxYear
//! [`TaxSchedule::calculate`]: crate::TaxSchedule::calculate

pub mod common;
pub mod schedules;
pub mod tax_engine;

pub use tax_engine::{TaxBreakdown, annualize_monthly, calculate_tax};
