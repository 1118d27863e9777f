//! actix-web handlers of the JSON API.

use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod articles;
pub mod comments;
pub mod main;
pub mod tags;

const NOT_FOUND_DETAIL: &str = "Not found.";
const CONFLICT_DETAIL: &str = "The request conflicts with the current state of the resource.";
const SERVER_ERROR_DETAIL: &str = "A server error occurred.";

/// Body of every non-validation error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Register every handler together with the extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        // Non-numeric ids do not name any resource.
        let response = HttpResponse::NotFound().json(ErrorBody::new(NOT_FOUND_DETAIL));
        InternalError::from_response(err, response).into()
    }))
    .service(main::api_root)
    .service(articles::list_articles)
    .service(articles::add_article)
    .service(articles::show_article)
    .service(articles::replace_article)
    .service(articles::patch_article)
    .service(articles::delete_article)
    .service(articles::add_comment)
    .service(comments::list_comments)
    .service(comments::post_comment)
    .service(comments::show_comment)
    .service(comments::replace_comment)
    .service(comments::patch_comment)
    .service(comments::delete_comment)
    .service(tags::list_tags)
    .service(tags::add_tag)
    .service(tags::show_tag)
    .service(tags::replace_tag)
    .service(tags::patch_tag)
    .service(tags::delete_tag)
    .service(tags::show_tag_articles);
}

/// Translate a service failure into its HTTP response.
///
/// Unexpected failures are logged with `operation`; their details never reach
/// the client.
pub fn error_response(err: ServiceError, operation: &str) -> HttpResponse {
    match err {
        ServiceError::Validation(errors) => HttpResponse::BadRequest().json(errors),
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody::new(NOT_FOUND_DETAIL)),
        ServiceError::Conflict(message) => {
            log::warn!("Conflict while trying to {operation}: {message}");
            HttpResponse::Conflict().json(ErrorBody::new(CONFLICT_DETAIL))
        }
        ServiceError::Internal(message) => {
            log::error!("Failed to {operation}: {message}");
            HttpResponse::InternalServerError().json(ErrorBody::new(SERVER_ERROR_DETAIL))
        }
    }
}
