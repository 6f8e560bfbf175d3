pub mod factory;
pub mod json_file;
pub mod memory;
pub mod repository;

pub use factory::{JsonFileStoreFactory, MemoryStoreFactory, StoreConfig, StoreFactory, StoreRegistry};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use repository::{StateStore, StoreError};
