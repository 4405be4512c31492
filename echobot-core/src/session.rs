//! Session ids and where clients keep them
//!
//! The server never validates or stores a session id. Clients hold on to
//! whatever id the server last echoed, under [`STORAGE_KEY`], the same way
//! the page keeps it in local storage.

use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Key the session id is stored under
pub const STORAGE_KEY: &str = "chatSessionId";

/// Opaque session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Errors from persistent session stores
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session file {path} is not a JSON object: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value storage for the current session id
pub trait SessionStore {
    fn load(&self) -> Result<Option<SessionId>, SessionError>;
    fn save(&mut self, id: &SessionId) -> Result<(), SessionError>;
    fn clear(&mut self) -> Result<(), SessionError>;
}

/// In-process store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    current: Option<SessionId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(id: SessionId) -> Self {
        Self { current: Some(id) }
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionId>, SessionError> {
        Ok(self.current.clone())
    }

    fn save(&mut self, id: &SessionId) -> Result<(), SessionError> {
        self.current = Some(id.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.current = None;
        Ok(())
    }
}

/// JSON file holding a flat string map, like a browser's local storage.
///
/// Other keys in the file are preserved on write.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|source| SessionError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), SessionError> {
        let io_err = |source: std::io::Error| SessionError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(map).map_err(|source| SessionError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, content).map_err(io_err)
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<SessionId>, SessionError> {
        let map = self.read_map()?;
        Ok(map
            .get(STORAGE_KEY)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(SessionId::new))
    }

    fn save(&mut self, id: &SessionId) -> Result<(), SessionError> {
        let mut map = self.read_map()?;
        map.insert(STORAGE_KEY.to_string(), Value::String(id.to_string()));
        self.write_map(&map)?;
        tracing::debug!(path = %self.path.display(), session_id = %id, "Saved session id");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        let mut map = self.read_map()?;
        if map.remove(STORAGE_KEY).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(&SessionId::new("abc")).unwrap();
        assert_eq!(store.load().unwrap(), Some(SessionId::new("abc")));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_has_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::new(&path);
        store.save(&SessionId::new("session-1")).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(SessionId::new("session-1")));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let mut store = FileStore::new(&path);
        store.save(&SessionId::new("s")).unwrap();
        store.clear().unwrap();

        let content: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(content["theme"], "dark");
        assert!(content.get(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(SessionError::Malformed { .. })));
    }
}
