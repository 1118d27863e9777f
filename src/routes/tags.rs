use actix_web::{HttpResponse, Responder, delete, get, patch, post, put, web};

use crate::forms::UpdateMode;
use crate::forms::tags::TagForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::tags::{
    TagArticlesQuery, TagQuery, create_tag, load_tag, load_tag_articles, load_tags, modify_tag,
    remove_tag,
};

#[get("/tags/")]
pub async fn list_tags(
    params: web::Query<TagQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_tags(repo.get_ref(), params.into_inner()) {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(err) => error_response(err, "list tags"),
    }
}

#[post("/tags/")]
pub async fn add_tag(
    repo: web::Data<DieselRepository>,
    form: web::Json<TagForm>,
) -> impl Responder {
    match create_tag(repo.get_ref(), form.into_inner()) {
        Ok(tag) => HttpResponse::Created().json(tag),
        Err(err) => error_response(err, "create tag"),
    }
}

#[get("/tags/{tag_id}/")]
pub async fn show_tag(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let tag_id = path.into_inner();

    match load_tag(repo.get_ref(), tag_id) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(err) => error_response(err, &format!("load tag {tag_id}")),
    }
}

#[put("/tags/{tag_id}/")]
pub async fn replace_tag(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<TagForm>,
) -> impl Responder {
    update(path.into_inner(), repo, form.into_inner(), UpdateMode::Full)
}

#[patch("/tags/{tag_id}/")]
pub async fn patch_tag(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<TagForm>,
) -> impl Responder {
    update(path.into_inner(), repo, form.into_inner(), UpdateMode::Partial)
}

#[delete("/tags/{tag_id}/")]
pub async fn delete_tag(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let tag_id = path.into_inner();

    match remove_tag(repo.get_ref(), tag_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, &format!("delete tag {tag_id}")),
    }
}

#[get("/tags/{tag_id}/articles/")]
pub async fn show_tag_articles(
    path: web::Path<i32>,
    params: web::Query<TagArticlesQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let tag_id = path.into_inner();

    match load_tag_articles(repo.get_ref(), tag_id, params.into_inner()) {
        Ok(articles) => HttpResponse::Ok().json(articles),
        Err(err) => error_response(err, &format!("list articles of tag {tag_id}")),
    }
}

fn update(
    tag_id: i32,
    repo: web::Data<DieselRepository>,
    form: TagForm,
    mode: UpdateMode,
) -> HttpResponse {
    match modify_tag(repo.get_ref(), tag_id, form, mode) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(err) => error_response(err, &format!("update tag {tag_id}")),
    }
}
