use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(target_arch = "wasm32")]
use crate::error::PaintError;
use crate::error::PaintResult;

/// Durable string storage keyed by name
pub trait KeyValueStore {
    /// The stored value, or `None` if nothing is stored under `key`
    fn get(&self, key: &str) -> PaintResult<Option<String>>;

    /// Store `value`, replacing whatever was there
    fn set(&mut self, key: &str, value: &str) -> PaintResult<()>;

    /// Forget `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> PaintResult<()>;
}

/// In-memory store, for tests and when no durable storage exists
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PaintResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PaintResult<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PaintResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PaintResult<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> PaintResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PaintResult<()> {
        match std::fs::remove_file(self.path(key)) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// The browser's `window.localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> PaintResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| PaintError::StorageUnavailable("no window".to_owned()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| PaintError::StorageUnavailable("localStorage is disabled".to_owned()))
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(err: wasm_bindgen::JsValue) -> PaintError {
    PaintError::StorageUnavailable(format!("{:?}", err))
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> PaintResult<Option<String>> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> PaintResult<()> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> PaintResult<()> {
        Self::storage()?.remove_item(key).map_err(js_error)
    }
}

/// Saves and restores the serialized stroke sequence under one fixed key
pub struct StrokePersistence {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for StrokePersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokePersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl StrokePersistence {
    pub fn new(store: Box<dyn KeyValueStore>, key: &str) -> Self {
        Self {
            store,
            key: key.to_owned(),
        }
    }

    /// The durable store for this platform
    #[cfg(not(target_arch = "wasm32"))]
    pub fn platform(config: &crate::config::CanvasConfig) -> Self {
        Self::new(Box::new(FileStore::new(&config.data_dir)), &config.storage_key)
    }

    /// The durable store for this platform
    #[cfg(target_arch = "wasm32")]
    pub fn platform(config: &crate::config::CanvasConfig) -> Self {
        Self::new(Box::new(LocalStore), &config.storage_key)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn save(&mut self, serialized: &str) -> PaintResult<()> {
        self.store.set(&self.key, serialized)
    }

    /// `Ok(None)` when nothing was saved yet
    pub fn load(&self) -> PaintResult<Option<String>> {
        self.store.get(&self.key)
    }

    pub fn clear_stored(&mut self) -> PaintResult<()> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaintError;

    #[test]
    fn test_memory_roundtrip() {
        let mut persistence = StrokePersistence::new(Box::new(MemoryStore::new()), "drawnArray");
        assert_eq!(persistence.load().unwrap(), None);

        persistence.save("[{}]").unwrap();
        persistence.save("[]").unwrap();
        assert_eq!(persistence.load().unwrap().as_deref(), Some("[]"));

        persistence.clear_stored().unwrap();
        persistence.clear_stored().unwrap();
        assert_eq!(persistence.load().unwrap(), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("paint_canvas_store_{}", std::process::id()));
        let mut store = FileStore::new(&dir);

        assert_eq!(store.get("drawnArray").unwrap(), None);
        store.set("drawnArray", "[]").unwrap();
        assert!(dir.join("drawnArray.json").exists());
        assert_eq!(store.get("drawnArray").unwrap().as_deref(), Some("[]"));

        store.remove("drawnArray").unwrap();
        store.remove("drawnArray").unwrap();
        assert_eq!(store.get("drawnArray").unwrap(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_unwritable_dir() {
        let file = std::env::temp_dir().join(format!("paint_canvas_blocker_{}", std::process::id()));
        std::fs::write(&file, "not a directory").unwrap();

        let mut store = FileStore::new(&file);
        let err = store.set("drawnArray", "[]").unwrap_err();
        assert!(matches!(err, PaintError::StorageUnavailable(_)));

        let _ = std::fs::remove_file(&file);
    }
}
