//! HTTP surface of the catalog.
//!
//! Each area exposes a `configure_routes` function; `configure` wires them together with
//! the record file mount and the embedded asset fallback.

pub mod catalog;
pub mod pages;
pub mod upload;

use crate::assets;
use crate::catalog::Catalog;
use crate::store::TextAttribute;
use actix_files::Files;
use actix_web::web;
use std::path::Path;

pub fn configure(
    cfg: &mut web::ServiceConfig,
    catalog_data: web::Data<Catalog>,
    data_dir: &Path,
) {
    // Text attributes stay private; only content files are published.
    let record_files =
        Files::new(catalog_data.public_prefix(), data_dir).path_filter(|path, _| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map_or(true, |name| !TextAttribute::is_reserved(name))
        });

    cfg.app_data(catalog_data)
        .configure(catalog::configure_routes)
        .configure(pages::configure_routes)
        .configure(upload::configure_routes)
        .service(record_files)
        .default_service(web::route().to(assets::serve_embedded));
}
