//! Loading slab schedules from CSV.

pub mod loader;

pub use loader::{SlabRecord, SlabScheduleLoader, SlabLoaderError};
