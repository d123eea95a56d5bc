pub mod history;
pub mod prefs;
pub mod storage;

pub use history::ArcadeStore;
pub use storage::{JsonFileStorage, MemoryStorage, Storage, StoreError};
