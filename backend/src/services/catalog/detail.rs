//! # Coral Detail Page
//!
//! Backend logic for `GET /coral/{id}`.
//!
//! ## Workflow
//!
//! 1.  **Lookup**: the id from the path is read straight from its directory through
//!     `Catalog::get_record`, with the same defaults the listing applies. Ids that are not
//!     a single path segment never reach the store.
//! 2.  **Render**: a found record is rendered with `CoralView`; anything else becomes the
//!     plain-text `404 Coral not found`.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::views::{self, CoralView};
use actix_web::{web, HttpResponse};

/// Actix web handler for `GET /coral/{id}`.
///
/// # Arguments
/// * `catalog` - Shared catalog used to read the record.
/// * `id` - The coral id, percent-decoded from the URL path.
///
/// # Returns
/// - `200 OK` with the rendered detail view.
/// - `404 Not Found` with `Coral not found` when no such record exists.
pub async fn process(
    catalog: web::Data<Catalog>,
    id: web::Path<String>,
) -> Result<HttpResponse, CatalogError> {
    let id = id.into_inner();
    let coral = web::block(move || catalog.get_record(&id)).await??;
    views::render(&CoralView { coral })
}
