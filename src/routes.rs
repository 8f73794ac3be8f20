use crate::api::{attendance, member};
use actix_web::{HttpResponse, error::InternalError, web};
use serde_json::json;

/// Answers undecodable JSON bodies with the same `{"detail": ...}` shape as
/// store errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        InternalError::from_response(err, HttpResponse::BadRequest().json(json!({ "detail": detail })))
            .into()
    })
}

// Paths are registered without trailing slashes; `NormalizePath::trim`
// maps `/members/` onto `/members`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/members")
                // /members
                .service(
                    web::resource("")
                        .route(web::post().to(member::create_member))
                        .route(web::get().to(member::list_members)),
                )
                // /members/{id}
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(member::get_member))
                        .route(web::put().to(member::update_member)),
                ),
        )
        .service(web::resource("/checkin/{id}").route(web::post().to(attendance::check_in)))
        .service(web::resource("/checkout/{id}").route(web::post().to(attendance::check_out)));
}
