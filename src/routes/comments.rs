use actix_web::{HttpResponse, Responder, delete, get, patch, post, put, web};

use crate::forms::UpdateMode;
use crate::forms::comments::{CommentForm, EditCommentForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::comments::{
    CommentQuery, create_comment, load_comment, load_comments, modify_comment, remove_comment,
};

#[get("/articles/{article_id}/comments/")]
pub async fn list_comments(
    path: web::Path<i32>,
    params: web::Query<CommentQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let article_id = path.into_inner();

    match load_comments(repo.get_ref(), article_id, params.into_inner()) {
        Ok(comments) => HttpResponse::Ok().json(comments),
        Err(err) => error_response(err, &format!("list comments of article {article_id}")),
    }
}

#[post("/articles/{article_id}/comments/")]
pub async fn post_comment(
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

#[get("/articles/{article_id}/comments/{comment_id}/")]
pub async fn show_comment(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (article_id, comment_id) = path.into_inner();

    match load_comment(repo.get_ref(), article_id, comment_id) {
        Ok(comment) => HttpResponse::Ok().json(comment),
        Err(err) => error_response(err, &format!("load comment {comment_id}")),
    }
}

#[put("/articles/{article_id}/comments/{comment_id}/")]
pub async fn replace_comment(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditCommentForm>,
) -> impl Responder {
    let (article_id, comment_id) = path.into_inner();
    update(article_id, comment_id, repo, form.into_inner(), UpdateMode::Full)
}

#[patch("/articles/{article_id}/comments/{comment_id}/")]
pub async fn patch_comment(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditCommentForm>,
) -> impl Responder {
    let (article_id, comment_id) = path.into_inner();
    update(article_id, comment_id, repo, form.into_inner(), UpdateMode::Partial)
}

#[delete("/articles/{article_id}/comments/{comment_id}/")]
pub async fn delete_comment(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (article_id, comment_id) = path.into_inner();

    match remove_comment(repo.get_ref(), article_id, comment_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, &format!("delete comment {comment_id}")),
    }
}

fn update(
    article_id: i32,
    comment_id: i32,
    repo: web::Data<DieselRepository>,
    form: EditCommentForm,
    mode: UpdateMode,
) -> HttpResponse {
    match modify_comment(repo.get_ref(), article_id, comment_id, form, mode) {
        Ok(comment) => HttpResponse::Ok().json(comment),
        Err(err) => error_response(err, &format!("update comment {comment_id}")),
    }
}
