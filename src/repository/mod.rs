use crate::db::{DbConnection, DbPool};
use crate::domain::article::{Article, ArticleListQuery, NewArticle, UpdateArticle};
use crate::domain::comment::{Comment, CommentListQuery, NewComment, UpdateComment};
use crate::domain::tag::{NewTag, Tag, TagListQuery, UpdateTag};

pub mod article;
pub mod comment;
pub mod errors;
pub mod tag;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over tag records.
pub trait TagReader {
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<Vec<Tag>>;
}

/// Write operations over tag records.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    fn update_tag(&self, tag_id: i32, updates: &UpdateTag) -> RepositoryResult<Tag>;
    /// Delete the tag and detach it from every article.
    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over article records.
///
/// Returned articles carry their tags and the number of approved comments.
pub trait ArticleReader {
    fn get_article_by_id(&self, id: i32) -> RepositoryResult<Option<Article>>;
    /// List published articles matching `query` together with the total count
    /// before pagination.
    fn list_articles(&self, query: ArticleListQuery) -> RepositoryResult<(usize, Vec<Article>)>;
}

/// Write operations over article records and their tag associations.
pub trait ArticleWriter {
    /// Insert the article and resolve its tags in one transaction.
    fn create_article(&self, new_article: &NewArticle) -> RepositoryResult<Article>;
    /// Apply the patch and, when it carries tags, replace the associations,
    /// all in one transaction.
    fn update_article(&self, article_id: i32, updates: &UpdateArticle)
    -> RepositoryResult<Article>;
    /// Delete the article together with its comments and tag associations.
    fn delete_article(&self, article_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over comment records.
pub trait CommentReader {
    /// Fetch a comment of `article_id` regardless of its moderation state.
    fn get_comment_by_id(
        &self,
        article_id: i32,
        comment_id: i32,
    ) -> RepositoryResult<Option<Comment>>;
    fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<Vec<Comment>>;
}

/// Write operations over comment records.
pub trait CommentWriter {
    fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment>;
    fn update_comment(
        &self,
        article_id: i32,
        comment_id: i32,
        updates: &UpdateComment,
    ) -> RepositoryResult<Comment>;
    fn delete_comment(&self, article_id: i32, comment_id: i32) -> RepositoryResult<()>;
}
