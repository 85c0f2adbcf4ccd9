//! Browser Storage
//!
//! `window.localStorage` behind the board's key-value store trait.

use sticker_board::{DomainError, DomainResult, KeyValueStore};

pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    /// Opens local storage. A page without it (privacy mode, sandboxed
    /// frame) still works; every read and write then fails.
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|win| win.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[STORE] localStorage unavailable, the board will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> DomainResult<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| DomainError::Storage("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for LocalStore {
    fn read(&self, key: &str) -> DomainResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|err| DomainError::Storage(format!("read {}: {:?}", key, err)))
    }

    fn write(&mut self, key: &str, value: &str) -> DomainResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| DomainError::Storage(format!("write {}: {:?}", key, err)))
    }
}
