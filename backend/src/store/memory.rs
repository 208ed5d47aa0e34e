use super::{CatalogStore, TextAttribute};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tree {
    root_present: bool,
    records: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
    unreadable: BTreeSet<String>,
    failing_file: Option<String>,
}

/// In-memory record tree with hooks for injecting failures.
#[derive(Default)]
pub struct MemoryCatalogStore {
    tree: Mutex<Tree>,
}

fn not_found(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, what.to_string())
}

impl MemoryCatalogStore {
    /// A store whose root exists but holds no records.
    pub fn new() -> Self {
        let store = Self::default();
        store.tree().root_present = true;
        store
    }

    /// A store whose root has not been created yet.
    pub fn without_root() -> Self {
        Self::default()
    }

    /// Listing the files of `id` will fail, as if the directory vanished mid-scan.
    pub fn mark_unreadable(&self, id: &str) {
        self.tree().unreadable.insert(id.to_string());
    }

    /// Writing a file (or text attribute) with this name will fail.
    pub fn fail_writes_to(&self, file_name: &str) {
        self.tree().failing_file = Some(file_name.to_string());
    }

    pub fn file(&self, id: &str, file_name: &str) -> Option<Vec<u8>> {
        self.tree()
            .records
            .get(id)
            .and_then(|files| files.get(file_name).cloned())
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().expect("memory store lock poisoned")
    }

    fn put(&self, id: &str, file_name: &str, bytes: &[u8]) -> io::Result<()> {
        let mut tree = self.tree();
        if tree.failing_file.as_deref() == Some(file_name) {
            return Err(io::Error::new(io::ErrorKind::Other, "injected write failure"));
        }
        let files = tree
            .records
            .get_mut(id)
            .ok_or_else(|| not_found(id))?;
        files.insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn list_ids(&self) -> io::Result<Vec<String>> {
        let tree = self.tree();
        if !tree.root_present {
            return Err(not_found("store root"));
        }
        Ok(tree.records.keys().cloned().collect())
    }

    fn record_exists(&self, id: &str) -> bool {
        self.tree().records.contains_key(id)
    }

    fn list_files(&self, id: &str) -> io::Result<Vec<String>> {
        let tree = self.tree();
        if tree.unreadable.contains(id) {
            return Err(not_found(id));
        }
        tree.records
            .get(id)
            .map(|files| files.keys().cloned().collect())
            .ok_or_else(|| not_found(id))
    }

    fn read_text(&self, id: &str, attr: TextAttribute) -> io::Result<String> {
        let bytes = self
            .file(id, attr.file_name())
            .ok_or_else(|| not_found(attr.file_name()))?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn ensure_record(&self, id: &str) -> io::Result<bool> {
        let mut tree = self.tree();
        tree.root_present = true;
        if tree.records.contains_key(id) {
            return Ok(false);
        }
        tree.records.insert(id.to_string(), BTreeMap::new());
        Ok(true)
    }

    fn write_text(&self, id: &str, attr: TextAttribute, text: &str) -> io::Result<()> {
        self.put(id, attr.file_name(), text.as_bytes())
    }

    fn write_file(&self, id: &str, file_name: &str, bytes: &[u8]) -> io::Result<()> {
        self.put(id, file_name, bytes)
    }

    fn remove_record(&self, id: &str) -> io::Result<()> {
        self.tree()
            .records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}
