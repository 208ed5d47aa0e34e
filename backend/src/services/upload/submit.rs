//! # Upload Submission Service
//!
//! Backend logic for `POST /upload`.
//!
//! ## Workflow
//!
//! 1.  **Parsing**: `read_submission` walks the multipart stream and buffers the text
//!     fields and image parts in memory. Empty file parts are skipped; a fifth image or a
//!     body past `MAX_UPLOAD_BYTES` ends the request with `400` before any write.
//! 2.  **Validation**: `UploadSubmission::new` checks the id and reduces file names to a
//!     single path component.
//! 3.  **Persisting**: `upload::submit` writes the directory, both text attributes and
//!     the images on the blocking pool, rolling back a freshly created record on failure.
//! 4.  **Redirect**: the client is sent back to `/admin`.

use super::MAX_UPLOAD_BYTES;
use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::upload::{self, too_many_images, UploadSubmission, UploadedImage};
use actix_multipart::{Field, Multipart};
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use common::requests::{
    AVAILABILITY_FIELD, CORAL_ID_FIELD, DESCRIPTION_FIELD, IMAGES_FIELD, MAX_UPLOAD_IMAGES,
};
use futures_util::StreamExt;
use log::{debug, info};

/// Actix web handler for `POST /upload`.
///
/// # Arguments
/// * `catalog` - Shared catalog whose store receives the files.
/// * `payload` - The `multipart/form-data` body.
///
/// # Returns
/// - `303 See Other` to `/admin` once everything is written.
/// - `400 Bad Request` for a missing or unusable id, bad file names, too many images or an
///   oversized body.
/// - `500 Internal Server Error` when the store rejects a write.
pub async fn process(
    catalog: web::Data<Catalog>,
    payload: Multipart,
) -> Result<HttpResponse, CatalogError> {
    let submission = read_submission(payload).await?;
    info!(
        "Upload received for coral '{}' with {} image(s)",
        submission.id(),
        submission.images().len()
    );

    web::block(move || upload::submit(catalog.store(), &submission)).await??;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/admin"))
        .finish())
}

/// Buffers the whole form before anything touches the store, so a rejected upload
/// (missing id, fifth image, oversized body) leaves no trace on disk.
async fn read_submission(mut payload: Multipart) -> Result<UploadSubmission, CatalogError> {
    let mut budget = MAX_UPLOAD_BYTES;
    let mut coral_id: Option<String> = None;
    let mut description = String::new();
    let mut availability = String::new();
    let mut images: Vec<UploadedImage> = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match field_name.as_deref() {
            Some(IMAGES_FIELD) => {
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                let bytes = read_field(&mut field, &mut budget).await?;

                // Browsers send an empty, nameless part when no file was picked.
                if file_name.is_empty() {
                    continue;
                }
                if images.len() == MAX_UPLOAD_IMAGES {
                    return Err(too_many_images());
                }
                images.push(UploadedImage { file_name, bytes });
            }
            Some(name @ CORAL_ID_FIELD) => {
                coral_id = Some(read_text(&mut field, name, &mut budget).await?)
            }
            Some(name @ DESCRIPTION_FIELD) => {
                description = read_text(&mut field, name, &mut budget).await?
            }
            Some(name @ AVAILABILITY_FIELD) => {
                availability = read_text(&mut field, name, &mut budget).await?
            }
            other => {
                debug!("Ignoring unexpected upload field {:?}", other);
                read_field(&mut field, &mut budget).await?;
            }
        }
    }

    let coral_id = coral_id.unwrap_or_default();
    UploadSubmission::new(&coral_id, description, availability, images)
}

async fn read_field(field: &mut Field, budget: &mut usize) -> Result<Vec<u8>, CatalogError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        *budget = budget.checked_sub(chunk.len()).ok_or_else(|| {
            CatalogError::InvalidUpload(format!(
                "Upload exceeds {} MiB",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            ))
        })?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_text(
    field: &mut Field,
    name: &str,
    budget: &mut usize,
) -> Result<String, CatalogError> {
    let bytes = read_field(field, budget).await?;
    String::from_utf8(bytes)
        .map_err(|_| CatalogError::InvalidUpload(format!("Field '{}' is not valid UTF-8", name)))
}
