//! HTML views, compiled from `templates/` by askama.

use crate::error::CatalogError;
use actix_web::HttpResponse;
use askama::Template;
use common::model::coral::CoralRecord;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView {
    pub corals: Vec<CoralRecord>,
}

#[derive(Template)]
#[template(path = "coral.html")]
pub struct CoralView {
    pub coral: CoralRecord,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminView {
    pub corals: Vec<CoralRecord>,
    pub max_images: usize,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactView;

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutView;

pub fn render<T: Template>(view: &T) -> Result<HttpResponse, CatalogError> {
    let html = view.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
