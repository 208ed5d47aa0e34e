//! Static pages with no catalog data.

use crate::error::CatalogError;
use crate::views::{self, AboutView, ContactView};
use actix_web::web::{self, get};
use actix_web::HttpResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/contact", get().to(contact))
        .route("/about", get().to(about));
}

async fn contact() -> Result<HttpResponse, CatalogError> {
    views::render(&ContactView)
}

async fn about() -> Result<HttpResponse, CatalogError> {
    views::render(&AboutView)
}
