//! Builds `CoralRecord`s from the store on every request.
//!
//! Reads are as forgiving as possible: a missing store root is an empty catalog, an
//! unreadable text file falls back to its default, and a record whose directory cannot
//! be listed is left out while the rest of the scan carries on.

use crate::error::CatalogError;
use crate::store::{is_record_segment, CatalogStore, TextAttribute};
use common::model::coral::{is_listed_image, CoralRecord};
use log::{debug, error, warn};
use std::io;
use std::sync::Arc;

pub struct Catalog {
    store: Arc<dyn CatalogStore>,
    public_prefix: String,
}

impl Catalog {
    /// `public_prefix` is where record files are mounted, e.g. `/coral-data`.
    pub fn new(store: Arc<dyn CatalogStore>, public_prefix: impl Into<String>) -> Self {
        Self {
            store,
            public_prefix: public_prefix.into(),
        }
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    pub fn list_records(&self) -> Vec<CoralRecord> {
        let ids = match self.store.list_ids() {
            Ok(ids) => ids,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Coral data directory does not exist, listing an empty catalog");
                return Vec::new();
            }
            Err(e) => {
                error!("Error reading coral data: {}", e);
                return Vec::new();
            }
        };

        ids.iter()
            .filter_map(|id| match self.load_record(id) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping coral '{}': {}", id, e);
                    None
                }
            })
            .collect()
    }

    /// Reads a single record directly, with the same defaults as `list_records`.
    ///
    /// Any id `list_records` can return is accepted here, including directory names the
    /// upload form would refuse.
    pub fn get_record(&self, id: &str) -> Result<CoralRecord, CatalogError> {
        if !is_record_segment(id) || !self.store.record_exists(id) {
            return Err(CatalogError::NotFound);
        }
        self.load_record(id).map_err(|e| {
            warn!("Coral '{}' could not be read: {}", id, e);
            CatalogError::NotFound
        })
    }

    fn load_record(&self, id: &str) -> io::Result<CoralRecord> {
        let images = self
            .store
            .list_files(id)?
            .into_iter()
            .filter(|file| is_listed_image(file))
            .map(|file| format!("{}/{}/{}", self.public_prefix, id, file))
            .collect();

        Ok(CoralRecord::new(
            id,
            self.read_optional(id, TextAttribute::Description),
            self.read_optional(id, TextAttribute::Availability),
            images,
        ))
    }

    fn read_optional(&self, id: &str, attr: TextAttribute) -> Option<String> {
        match self.store.read_text(id, attr) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("No {} for coral '{}': {}", attr, id, e);
                None
            }
        }
    }
}
