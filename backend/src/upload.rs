//! Persists admin submissions into the store.
//!
//! A submission touches several files (directory, two text attributes, images) with no
//! transaction around them. When a write fails on a record this submission created, the
//! whole directory is removed again; failures on an existing record leave whatever was
//! already written in place.

use crate::error::CatalogError;
use crate::store::{is_valid_id, CatalogStore, TextAttribute};
use common::requests::MAX_UPLOAD_IMAGES;
use log::{error, info, warn};
use std::io;

/// One uploaded file, as sent by the browser.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A validated admin submission, ready to be written.
#[derive(Debug, Clone)]
pub struct UploadSubmission {
    id: String,
    description: String,
    availability: String,
    images: Vec<UploadedImage>,
}

impl UploadSubmission {
    pub fn new(
        id: &str,
        description: String,
        availability: String,
        images: Vec<UploadedImage>,
    ) -> Result<Self, CatalogError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CatalogError::InvalidUpload("Coral id is required".to_string()));
        }
        if !is_valid_id(id) {
            return Err(CatalogError::InvalidUpload(format!(
                "Coral id '{}' may only contain letters, digits, '-' and '_'",
                id
            )));
        }
        if images.len() > MAX_UPLOAD_IMAGES {
            return Err(too_many_images());
        }

        let images = images
            .into_iter()
            .map(|image| {
                Ok(UploadedImage {
                    file_name: stored_file_name(&image.file_name)?,
                    bytes: image.bytes,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Self {
            id: id.to_string(),
            description,
            availability,
            images,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn images(&self) -> &[UploadedImage] {
        &self.images
    }
}

pub fn too_many_images() -> CatalogError {
    CatalogError::InvalidUpload(format!(
        "At most {} images can be uploaded at once",
        MAX_UPLOAD_IMAGES
    ))
}

/// Keeps the last path component of a browser-supplied file name.
fn stored_file_name(raw: &str) -> Result<String, CatalogError> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(CatalogError::InvalidUpload(format!(
            "'{}' is not a usable file name",
            raw
        )));
    }
    if TextAttribute::is_reserved(name) {
        return Err(CatalogError::InvalidUpload(format!(
            "'{}' is a reserved file name",
            name
        )));
    }
    Ok(name.to_string())
}

pub fn submit(store: &dyn CatalogStore, submission: &UploadSubmission) -> Result<(), CatalogError> {
    let created = store.ensure_record(&submission.id)?;

    if let Err(e) = write_submission(store, submission) {
        if created {
            warn!(
                "Upload for new coral '{}' failed, removing its directory",
                submission.id
            );
            if let Err(cleanup) = store.remove_record(&submission.id) {
                error!(
                    "Could not remove partially written coral '{}': {}",
                    submission.id, cleanup
                );
            }
        }
        return Err(CatalogError::Write(e));
    }

    info!(
        "Stored coral '{}' with {} new image(s)",
        submission.id,
        submission.images.len()
    );
    Ok(())
}

fn write_submission(store: &dyn CatalogStore, submission: &UploadSubmission) -> io::Result<()> {
    let id = &submission.id;
    store.write_text(id, TextAttribute::Description, &submission.description)?;
    store.write_text(id, TextAttribute::Availability, &submission.availability)?;
    for image in &submission.images {
        store.write_file(id, &image.file_name, &image.bytes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::store::MemoryCatalogStore;
    use std::sync::Arc;

    fn image(name: &str, bytes: &[u8]) -> UploadedImage {
        UploadedImage {
            file_name: name.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    fn submission(id: &str, description: &str, images: &[&str]) -> UploadSubmission {
        UploadSubmission::new(
            id,
            description.to_string(),
            "In stock".to_string(),
            images.iter().map(|name| image(name, name.as_bytes())).collect(),
        )
        .unwrap()
    }

    fn setup() -> (Arc<MemoryCatalogStore>, Catalog) {
        let store = Arc::new(MemoryCatalogStore::new());
        let catalog = Catalog::new(store.clone(), "/coral-data");
        (store, catalog)
    }

    #[test]
    fn submitted_record_shows_up_in_listing() {
        let (store, catalog) = setup();
        submit(
            &*store,
            &submission("brain-coral", "d", &["a.jpg", "b.jpg"]),
        )
        .unwrap();

        let records = catalog.list_records();
        assert_eq!(records.len(), 1);
        let coral = &records[0];
        assert_eq!(coral.id, "brain-coral");
        assert_eq!(coral.description, "d");
        assert_eq!(coral.availability, "In stock");
        assert_eq!(
            coral.images,
            vec![
                "/coral-data/brain-coral/a.jpg",
                "/coral-data/brain-coral/b.jpg"
            ]
        );
    }

    #[test]
    fn resubmitting_overwrites_text_without_duplicating() {
        let (store, catalog) = setup();
        submit(&*store, &submission("torch", "old", &[])).unwrap();
        submit(&*store, &submission("torch", "new", &[])).unwrap();

        let records = catalog.list_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "new");
    }

    #[test]
    fn later_uploads_add_images_and_replace_same_names() {
        let (store, catalog) = setup();
        submit(
            &*store,
            &submission("acan", "d", &["1.jpg", "2.jpg", "3.jpg", "4.jpg"]),
        )
        .unwrap();
        let second = UploadSubmission::new(
            "acan",
            "d".to_string(),
            "In stock".to_string(),
            vec![image("4.jpg", b"replaced"), image("5.jpg", b"5")],
        )
        .unwrap();
        submit(&*store, &second).unwrap();

        let record = catalog.get_record("acan").unwrap();
        let files: Vec<&str> = record
            .images
            .iter()
            .map(|path| path.rsplit('/').next().unwrap())
            .collect();
        assert_eq!(files, vec!["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg"]);
        assert_eq!(store.file("acan", "4.jpg").unwrap(), b"replaced");
    }

    #[test]
    fn rejects_missing_or_unsafe_ids() {
        for id in ["", "   ", "../escape", "a/b", "two words"] {
            let result = UploadSubmission::new(id, String::new(), String::new(), vec![]);
            assert!(
                matches!(result, Err(CatalogError::InvalidUpload(_))),
                "id {:?} should be rejected",
                id
            );
        }
    }

    #[test]
    fn rejects_a_fifth_image() {
        let images = (0..5).map(|i| image(&format!("{}.jpg", i), b"x")).collect();
        let result = UploadSubmission::new("acan", String::new(), String::new(), images);
        assert!(matches!(result, Err(CatalogError::InvalidUpload(_))));
    }

    #[test]
    fn file_names_are_reduced_to_their_last_component() {
        let sub = UploadSubmission::new(
            "acan",
            String::new(),
            String::new(),
            vec![
                image("C:\\Users\\laura\\reef.jpg", b"x"),
                image("../../top.jpg", b"y"),
            ],
        )
        .unwrap();
        let names: Vec<&str> = sub.images().iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["reef.jpg", "top.jpg"]);
    }

    #[test]
    fn rejects_unusable_or_reserved_file_names() {
        for name in ["..", "dir/", "description.txt", "AVAILABILITY.txt"] {
            let result = UploadSubmission::new(
                "acan",
                String::new(),
                String::new(),
                vec![image(name, b"x")],
            );
            assert!(
                matches!(result, Err(CatalogError::InvalidUpload(_))),
                "file name {:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn failed_upload_of_new_record_is_rolled_back() {
        let (store, catalog) = setup();
        store.fail_writes_to("b.jpg");

        let result = submit(&*store, &submission("hammer", "d", &["a.jpg", "b.jpg"]));
        assert!(matches!(result, Err(CatalogError::Write(_))));
        assert!(!store.record_exists("hammer"));
        assert!(catalog.list_records().is_empty());
    }

    #[test]
    fn failed_upload_of_existing_record_keeps_prior_state() {
        let (store, catalog) = setup();
        submit(&*store, &submission("hammer", "first", &["a.jpg"])).unwrap();
        store.fail_writes_to("b.jpg");

        let result = submit(&*store, &submission("hammer", "second", &["b.jpg"]));
        assert!(matches!(result, Err(CatalogError::Write(_))));
        let record = catalog.get_record("hammer").unwrap();
        assert_eq!(record.description, "second");
        assert_eq!(record.images, vec!["/coral-data/hammer/a.jpg"]);
    }
}
