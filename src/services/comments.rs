use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::comment::{Comment, CommentListQuery, CommentSort};
use crate::domain::ordering::SortOrder;
use crate::forms::UpdateMode;
use crate::forms::comments::{CommentForm, EditCommentForm};
use crate::repository::{ArticleReader, CommentReader, CommentWriter};
use crate::services::articles::find_published_article;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the comment list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CommentQuery {
    /// `created_at` or `-created_at`.
    pub ordering: Option<String>,
}

/// Public representation of a comment.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommentView {
    pub id: i32,
    /// Identifier of the owning article.
    pub article: i32,
    pub content: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub is_approved: bool,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            article: comment.article_id,
            content: comment.content,
            author_name: comment.author_name,
            created_at: comment.created_at.and_utc(),
            is_approved: comment.is_approved,
        }
    }
}

/// Lists the approved comments of a published article.
pub fn load_comments<R>(
    repo: &R,
    article_id: i32,
    query: CommentQuery,
) -> ServiceResult<Vec<CommentView>>
where
    R: ArticleReader + CommentReader + ?Sized,
{
    find_published_article(repo, article_id)?;

    let ordering = SortOrder::parse_or(
        query.ordering.as_deref(),
        SortOrder::asc(CommentSort::CreatedAt),
    );
    let comments = repo.list_comments(CommentListQuery::new(article_id).order_by(ordering))?;

    Ok(comments.into_iter().map(CommentView::from).collect())
}

/// Fetches an approved comment of a published article.
pub fn load_comment<R>(repo: &R, article_id: i32, comment_id: i32) -> ServiceResult<CommentView>
where
    R: ArticleReader + CommentReader + ?Sized,
{
    find_published_article(repo, article_id)?;

    find_visible_comment(repo, article_id, comment_id).map(CommentView::from)
}

/// Posts a comment on a published article.
pub fn create_comment<R>(repo: &R, article_id: i32, form: CommentForm) -> ServiceResult<CommentView>
where
    R: ArticleReader + CommentWriter + ?Sized,
{
    find_published_article(repo, article_id)?;

    let new_comment = form.into_new_comment(article_id, Utc::now().naive_utc())?;
    let comment = repo.create_comment(&new_comment)?;
    log::info!(
        "Comment created: {} on article {} by {}",
        comment.id,
        article_id,
        comment.author_name
    );

    Ok(comment.into())
}

/// Edits or moderates an approved comment.
pub fn modify_comment<R>(
    repo: &R,
    article_id: i32,
    comment_id: i32,
    form: EditCommentForm,
    mode: UpdateMode,
) -> ServiceResult<CommentView>
where
    R: ArticleReader + CommentReader + CommentWriter + ?Sized,
{
    find_published_article(repo, article_id)?;
    let current = find_visible_comment(repo, article_id, comment_id)?;

    let update = form.into_update_comment(mode, &current)?;
    let comment = repo.update_comment(article_id, comment_id, &update)?;
    log::info!("Comment updated: {} on article {}", comment.id, article_id);

    Ok(comment.into())
}

/// Deletes an approved comment.
pub fn remove_comment<R>(repo: &R, article_id: i32, comment_id: i32) -> ServiceResult<()>
where
    R: ArticleReader + CommentReader + CommentWriter + ?Sized,
{
    find_published_article(repo, article_id)?;
    find_visible_comment(repo, article_id, comment_id)?;

    repo.delete_comment(article_id, comment_id)?;
    log::info!("Comment deleted: {comment_id} on article {article_id}");

    Ok(())
}

// Comments awaiting moderation are treated as missing.
fn find_visible_comment<R>(repo: &R, article_id: i32, comment_id: i32) -> ServiceResult<Comment>
where
    R: CommentReader + ?Sized,
{
    match repo.get_comment_by_id(article_id, comment_id)? {
        Some(comment) if comment.is_approved => Ok(comment),
        _ => Err(ServiceError::NotFound),
    }
}
