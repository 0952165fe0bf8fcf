pub mod health;
pub mod notes;

use actix_web::{HttpResponse, error, web};

/// JSON payload failures (malformed body, wrong content type) come back in
/// the same `{"error": ...}` envelope as handler-level errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let resp = HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid JSON"
        }));
        error::InternalError::from_response(err, resp).into()
    })
}
