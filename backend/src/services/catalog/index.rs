//! # Catalog Page
//!
//! Backend logic for `GET /`, the public listing of every coral.
//!
//! ## Workflow
//!
//! 1.  **Scan**: `load_all` runs `Catalog::list_records` on the blocking pool. A missing
//!     store root yields an empty list, never an error.
//! 2.  **Render**: the records are handed to `IndexView` and returned as HTML.

use super::load_all;
use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::views::{self, IndexView};
use actix_web::{web, HttpResponse};
use log::debug;

/// Actix web handler for `GET /`.
///
/// # Arguments
/// * `catalog` - Shared catalog used to scan the store.
///
/// # Returns
/// - `200 OK` with the rendered catalog view.
/// - `500 Internal Server Error` if the view fails to render.
pub async fn process(catalog: web::Data<Catalog>) -> Result<HttpResponse, CatalogError> {
    let corals = load_all(catalog).await?;
    debug!("Loaded corals: {:?}", corals);
    views::render(&IndexView { corals })
}
