//! In-memory audio artifact store
//!
//! Encoded WAV files are registered here and referenced by opaque handles,
//! so the playback widget and the download affordance can share one copy of
//! the bytes. Handles have an explicit lifecycle: registered when a
//! conversion finishes, released when the last holder is done with them.
//! Forgetting to release leaks the entry; using a released handle is a
//! lifecycle bug in the caller and panics.

use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::Result;

/// Opaque identifier for a registered audio artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(Uuid);

impl std::fmt::Display for HandleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Shared registry of live audio artifacts
///
/// Registration and release are serialized behind a mutex; the byte
/// payloads themselves are immutable and handed out as shared slices, so
/// holders never contend with each other or with new registrations.
#[derive(Debug, Default)]
pub struct AudioStore {
    entries: Mutex<HashMap<HandleId, Arc<[u8]>>>,
}

impl AudioStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded bytes and return their handle
    pub fn register(&self, bytes: Vec<u8>) -> HandleId {
        let id = HandleId(Uuid::new_v4());
        let byte_len = bytes.len();

        self.entries
            .lock()
            .expect("audio store lock poisoned")
            .insert(id, bytes.into());

        tracing::debug!(handle = %id, bytes = byte_len, "audio artifact registered");
        id
    }

    /// Shared access to an artifact's bytes
    ///
    /// # Panics
    ///
    /// Panics if the handle was never registered or has been released;
    /// holding a dead handle is a lifecycle bug in the caller.
    #[must_use]
    pub fn bytes(&self, id: HandleId) -> Arc<[u8]> {
        self.entries
            .lock()
            .expect("audio store lock poisoned")
            .get(&id)
            .unwrap_or_else(|| panic!("audio handle {id} not registered or already released"))
            .clone()
    }

    /// Open an artifact as a streamable byte source
    ///
    /// # Panics
    ///
    /// Panics if the handle was never registered or has been released.
    #[must_use]
    pub fn reader(&self, id: HandleId) -> Cursor<Arc<[u8]>> {
        Cursor::new(self.bytes(id))
    }

    /// Write an artifact to `dir` under a generated collision-free filename
    ///
    /// The filename carries a UTC timestamp, the handle prefix, and a
    /// `.wav` suffix. Returns the full path written.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    ///
    /// # Panics
    ///
    /// Panics if the handle was never registered or has been released.
    pub fn save_to(&self, id: HandleId, dir: &Path) -> Result<PathBuf> {
        let bytes = self.bytes(id);

        let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let short = &id.to_string()[..8];
        let path = dir.join(format!("kotoba-{stamp}-{short}.wav"));

        fs::write(&path, &bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "audio artifact saved");
        Ok(path)
    }

    /// Release an artifact, permitting its memory to be reclaimed
    ///
    /// Holders that cloned the bytes out keep their copies; the handle
    /// itself is dead from here on.
    ///
    /// # Panics
    ///
    /// Panics if the handle was never registered or was already released.
    pub fn release(&self, id: HandleId) {
        let removed = self
            .entries
            .lock()
            .expect("audio store lock poisoned")
            .remove(&id);

        assert!(
            removed.is_some(),
            "audio handle {id} not registered or already released"
        );
        tracing::debug!(handle = %id, "audio artifact released");
    }

    /// Number of live artifacts
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("audio store lock poisoned").len()
    }

    /// Whether the store holds no artifacts
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_register_and_read_back() {
        let store = AudioStore::new();
        let id = store.register(vec![1, 2, 3]);

        assert_eq!(store.bytes(id).as_ref(), &[1, 2, 3]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_bytes_shared_not_copied() {
        let store = AudioStore::new();
        let id = store.register(vec![0; 64]);

        let a = store.bytes(id);
        let b = store.bytes(id);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_reader_streams_full_payload() {
        let store = AudioStore::new();
        let id = store.register(vec![9, 8, 7]);

        let mut out = Vec::new();
        store.reader(id).read_to_end(&mut out).unwrap();
        assert_eq!(out, [9, 8, 7]);
    }

    #[test]
    fn test_release_removes_entry() {
        let store = AudioStore::new();
        let id = store.register(vec![1]);
        store.release(id);
        assert!(store.is_empty());
    }

    #[test]
    fn test_released_bytes_survive_for_existing_holders() {
        let store = AudioStore::new();
        let id = store.register(vec![5, 5]);

        let held = store.bytes(id);
        store.release(id);
        assert_eq!(held.as_ref(), &[5, 5]);
    }

    #[test]
    #[should_panic(expected = "already released")]
    fn test_double_release_panics() {
        let store = AudioStore::new();
        let id = store.register(vec![1]);
        store.release(id);
        store.release(id);
    }

    #[test]
    #[should_panic(expected = "already released")]
    fn test_bytes_after_release_panics() {
        let store = AudioStore::new();
        let id = store.register(vec![1]);
        store.release(id);
        let _ = store.bytes(id);
    }
}
