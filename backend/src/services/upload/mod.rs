//! Admin uploads.
//!
//! - `POST /upload`: `multipart/form-data` with the text fields `coralId`, `description`
//!   and `availability`, plus up to four files in `images`. Each file is stored in the
//!   coral's directory under its submitted name. Answers `303 See Other` to `/admin`.

mod submit;

/// Cap on the whole multipart body, all parts included.
pub(crate) const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

use actix_web::web::{self, post};

/// Registers the upload route on the application.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload", post().to(submit::process));
}
