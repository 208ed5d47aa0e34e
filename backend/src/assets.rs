use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use mime_guess::from_path;

/// Stylesheet and other site assets, compiled into the binary.
static PUBLIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/public");

/// Fallback service: anything no route claimed is looked up among the public assets.
pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');

    match PUBLIC_DIR.get_file(path) {
        Some(file) if !path.is_empty() => {
            let mime = from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        _ => HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Not Found"),
    }
}
