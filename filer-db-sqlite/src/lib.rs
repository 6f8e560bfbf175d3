//! SQLite backend for the filing wizard's state store.

mod factory;
mod repository;

pub use factory::SqliteStoreFactory;
pub use repository::SqliteStateStore;
