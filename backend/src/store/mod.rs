//! Storage seam for coral records.
//!
//! A record is a directory named after its id holding two optional text attributes and
//! any number of content files. `FsCatalogStore` keeps them on disk; tests swap in the
//! in-memory `MemoryCatalogStore`.

mod fs;
#[cfg(test)]
mod memory;

pub use self::fs::FsCatalogStore;
#[cfg(test)]
pub use self::memory::MemoryCatalogStore;

use regex::Regex;
use std::fmt;
use std::io;
use std::sync::OnceLock;

/// The two free-text files a record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAttribute {
    Description,
    Availability,
}

impl TextAttribute {
    pub const ALL: [TextAttribute; 2] = [TextAttribute::Description, TextAttribute::Availability];

    pub fn file_name(self) -> &'static str {
        match self {
            TextAttribute::Description => "description.txt",
            TextAttribute::Availability => "availability.txt",
        }
    }

    /// Whether `file_name` is reserved for a text attribute.
    pub fn is_reserved(file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        Self::ALL.iter().any(|attr| attr.file_name() == lower)
    }
}

impl fmt::Display for TextAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextAttribute::Description => f.write_str("description"),
            TextAttribute::Availability => f.write_str("availability"),
        }
    }
}

/// Directory-scoped access to the record tree.
///
/// Implementations trust their callers to pass ids accepted by [`is_valid_id`] and
/// plain file names (no separators).
pub trait CatalogStore: Send + Sync {
    /// Ids of every record, sorted. Fails with `NotFound` when the store root is absent.
    fn list_ids(&self) -> io::Result<Vec<String>>;

    fn record_exists(&self, id: &str) -> bool;

    /// Names of the plain files inside a record, sorted.
    fn list_files(&self, id: &str) -> io::Result<Vec<String>>;

    fn read_text(&self, id: &str, attr: TextAttribute) -> io::Result<String>;

    /// Creates the record directory if needed. Returns `true` when it did not exist.
    fn ensure_record(&self, id: &str) -> io::Result<bool>;

    fn write_text(&self, id: &str, attr: TextAttribute, text: &str) -> io::Result<()>;

    fn write_file(&self, id: &str, file_name: &str, bytes: &[u8]) -> io::Result<()>;

    fn remove_record(&self, id: &str) -> io::Result<()>;
}

/// Whether `id` can name an existing record directory: one path segment, nothing that
/// climbs out of the store root. Directories created outside the app (with spaces or dots
/// in their names) pass; new uploads are held to the stricter [`is_valid_id`].
pub fn is_record_segment(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\', '\0'])
}

/// Record ids become directory names, so only letters, digits, `-` and `_` pass.
pub fn is_valid_id(id: &str) -> bool {
    static ID_PATTERN: OnceLock<Regex> = OnceLock::new();
    ID_PATTERN
        .get_or_init(|| Regex::new(r"^[\p{L}\p{N}_\-]+$").expect("id pattern compiles"))
        .is_match(id)
}
