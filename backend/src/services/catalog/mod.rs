//! Read-only catalog pages.
//!
//! - `GET /`: every coral, rendered as the catalog view.
//! - `GET /coral/{id}`: one coral's detail page, or a plain `404 Coral not found`.
//! - `GET /admin`: every coral plus the upload form.
//!
//! Store scans run on the blocking pool; each request sees the directory tree as it is
//! at that moment.

mod admin;
mod detail;
mod index;

use crate::catalog::Catalog;
use crate::error::CatalogError;
use actix_web::web::{self, get};
use common::model::coral::CoralRecord;

/// Registers the catalog routes. They live at the site root, so they are added to the
/// app's `ServiceConfig` directly instead of being wrapped in a `Scope`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", get().to(index::process))
        .route("/coral/{id}", get().to(detail::process))
        .route("/admin", get().to(admin::process));
}

/// Scans every record on the blocking pool.
async fn load_all(catalog: web::Data<Catalog>) -> Result<Vec<CoralRecord>, CatalogError> {
    Ok(web::block(move || catalog.list_records()).await?)
}
