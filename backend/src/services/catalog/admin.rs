//! # Admin Page
//!
//! Backend logic for `GET /admin`: the same listing as the catalog page, condensed into a
//! table, under the form that posts to `/upload`. There is no authentication.

use super::load_all;
use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::views::{self, AdminView};
use actix_web::{web, HttpResponse};
use common::requests::MAX_UPLOAD_IMAGES;

/// Actix web handler for `GET /admin`.
///
/// # Returns
/// - `200 OK` with the upload form and the current corals.
/// - `500 Internal Server Error` if the view fails to render.
pub async fn process(catalog: web::Data<Catalog>) -> Result<HttpResponse, CatalogError> {
    let corals = load_all(catalog).await?;
    views::render(&AdminView {
        corals,
        max_images: MAX_UPLOAD_IMAGES,
    })
}
