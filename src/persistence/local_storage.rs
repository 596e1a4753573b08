//! Browser LocalStorage backend

use web_sys::Storage;

use super::KeyValueStore;

/// `window.localStorage`, if the browser grants it
///
/// Missing storage (private mode, sandboxed frames) turns every call into a
/// no-op so the game still runs.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, best score will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                log::warn!("Failed to write {}: {:?}", key, e);
            }
        }
    }
}
