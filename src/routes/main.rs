use actix_web::{HttpResponse, Responder, get};

use crate::services::main::api_root as describe_api;

#[get("/")]
pub async fn api_root() -> impl Responder {
    HttpResponse::Ok().json(describe_api())
}
