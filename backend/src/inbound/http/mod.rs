//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod projects;
pub mod state;

pub use error::ApiResult;

use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::ApiError;

/// Register routes and payload-error mapping on an application.
///
/// Middleware is composed by the caller (server bootstrap or test); this
/// function only wires handlers and the extractor configurations that keep
/// malformed payloads inside the wire error taxonomy.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api")
                .service(projects::list_published)
                .service(projects::get_project)
                .service(projects::list_projects)
                .service(projects::create_project)
                .service(projects::update_project)
                .service(projects::delete_project),
        )
        .service(health::live)
        .service(health::ready);
}

fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::validation_failed()
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

fn path_error_handler(err: actix_web::error::PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::validation_failed()
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::validation_failed()
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}
