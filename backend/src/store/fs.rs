use super::{CatalogStore, TextAttribute};
use log::warn;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Keeps one directory per record under `root`.
pub struct FsCatalogStore {
    root: PathBuf,
}

impl FsCatalogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }
}

fn sorted_names(dir: &Path, want_dirs: bool) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let wanted = if want_dirs {
            file_type.is_dir()
        } else {
            file_type.is_file()
        };
        if !wanted {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => warn!("Skipping non UTF-8 entry {:?} in {}", name, dir.display()),
        }
    }
    names.sort();
    Ok(names)
}

impl CatalogStore for FsCatalogStore {
    fn list_ids(&self) -> io::Result<Vec<String>> {
        sorted_names(&self.root, true)
    }

    fn record_exists(&self, id: &str) -> bool {
        self.record_dir(id).is_dir()
    }

    fn list_files(&self, id: &str) -> io::Result<Vec<String>> {
        sorted_names(&self.record_dir(id), false)
    }

    fn read_text(&self, id: &str, attr: TextAttribute) -> io::Result<String> {
        fs::read_to_string(self.record_dir(id).join(attr.file_name()))
    }

    fn ensure_record(&self, id: &str) -> io::Result<bool> {
        let dir = self.record_dir(id);
        if dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&dir)?;
        Ok(true)
    }

    fn write_text(&self, id: &str, attr: TextAttribute, text: &str) -> io::Result<()> {
        // Swap the file in whole so a concurrent reader never sees a partial write.
        let dir = self.record_dir(id);
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.persist(dir.join(attr.file_name()))
            .map_err(|e| e.error)?;
        Ok(())
    }

    fn write_file(&self, id: &str, file_name: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.record_dir(id).join(file_name), bytes)
    }

    fn remove_record(&self, id: &str) -> io::Result<()> {
        fs::remove_dir_all(self.record_dir(id))
    }
}
