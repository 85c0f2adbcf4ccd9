//! Persistence
//!
//! One key-value slot holds the whole board as a JSON array. Writes are
//! debounced and always replace the entire snapshot.

mod debounce;
mod snapshot;
mod storage;

pub use debounce::{DebouncedSaver, Debouncer};
pub use snapshot::{decode, encode};
pub use storage::{KeyValueStore, MemoryStore};
