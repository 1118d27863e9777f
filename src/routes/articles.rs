use actix_web::{HttpResponse, Responder, delete, get, patch, post, put, web};

use crate::forms::UpdateMode;
use crate::forms::articles::ArticleForm;
use crate::forms::comments::CommentForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::articles::{
    ArticleQuery, create_article, load_article, load_articles, modify_article, remove_article,
};
use crate::services::comments::create_comment;

#[get("/articles/")]
pub async fn list_articles(
    params: web::Query<ArticleQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_articles(repo.get_ref(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err, "list articles"),
    }
}

#[post("/articles/")]
pub async fn add_article(
    repo: web::Data<DieselRepository>,
    form: web::Json<ArticleForm>,
) -> impl Responder {
    match create_article(repo.get_ref(), form.into_inner()) {
        Ok(article) => HttpResponse::Created().json(article),
        Err(err) => error_response(err, "create article"),
    }
}

#[get("/articles/{article_id}/")]
pub async fn show_article(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let article_id = path.into_inner();

    match load_article(repo.get_ref(), article_id) {
        Ok(article) => HttpResponse::Ok().json(article),
        Err(err) => error_response(err, &format!("load article {article_id}")),
    }
}

#[put("/articles/{article_id}/")]
pub async fn replace_article(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<ArticleForm>,
) -> impl Responder {
    update(path.into_inner(), repo, form.into_inner(), UpdateMode::Full)
}

#[patch("/articles/{article_id}/")]
pub async fn patch_article(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<ArticleForm>,
) -> impl Responder {
    update(path.into_inner(), repo, form.into_inner(), UpdateMode::Partial)
}

#[delete("/articles/{article_id}/")]
pub async fn delete_article(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let article_id = path.into_inner();

    match remove_article(repo.get_ref(), article_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, &format!("delete article {article_id}")),
    }
}

/// Shortcut for posting a comment, kept next to the article resource.
#[post("/articles/{article_id}/add_comment/")]
pub async fn add_comment(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<CommentForm>,
) -> impl Responder {
    let article_id = path.into_inner();

    match create_comment(repo.get_ref(), article_id, form.into_inner()) {
        Ok(comment) => HttpResponse::Created().json(comment),
        Err(err) => error_response(err, &format!("add comment to article {article_id}")),
    }
}

fn update(
    article_id: i32,
    repo: web::Data<DieselRepository>,
    form: ArticleForm,
    mode: UpdateMode,
) -> HttpResponse {
    match modify_article(repo.get_ref(), article_id, form, mode) {
        Ok(article) => HttpResponse::Ok().json(article),
        Err(err) => error_response(err, &format!("update article {article_id}")),
    }
}
