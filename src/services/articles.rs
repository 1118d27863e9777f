use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::article::{Article, ArticleListQuery, default_article_ordering};
use crate::domain::comment::CommentListQuery;
use crate::domain::ordering::SortOrder;
use crate::forms::UpdateMode;
use crate::forms::articles::ArticleForm;
use crate::pagination::{Paginated, Pagination};
use crate::repository::{ArticleReader, ArticleWriter, CommentReader};
use crate::services::comments::CommentView;
use crate::services::tags::TagView;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the article list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleQuery {
    /// Whitespace separated terms matched against the title and the content.
    pub search: Option<String>,
    /// `created_at`, `updated_at` or `title`, optionally prefixed with `-`.
    pub ordering: Option<String>,
    /// Page number requested by the client (1-based).
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Article as shown in list responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArticleListItem {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub tags: Vec<TagView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_published: bool,
    /// Number of approved comments.
    pub comments_count: usize,
    pub is_recent: bool,
}

impl ArticleListItem {
    pub fn new(article: Article, now: NaiveDateTime) -> Self {
        let is_recent = article.is_recent(now);
        Self {
            id: article.id,
            title: article.title,
            content: article.content,
            tags: article.tags.into_iter().map(TagView::from).collect(),
            created_at: article.created_at.and_utc(),
            updated_at: article.updated_at.and_utc(),
            is_published: article.is_published,
            comments_count: article.comments_count,
            is_recent,
        }
    }
}

/// Article with its approved comments, as shown by detail responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArticleDetail {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub tags: Vec<TagView>,
    pub comments: Vec<CommentView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_published: bool,
    pub is_recent: bool,
}

impl ArticleDetail {
    pub fn new(article: Article, comments: Vec<CommentView>, now: NaiveDateTime) -> Self {
        let is_recent = article.is_recent(now);
        Self {
            id: article.id,
            title: article.title,
            content: article.content,
            tags: article.tags.into_iter().map(TagView::from).collect(),
            comments,
            created_at: article.created_at.and_utc(),
            updated_at: article.updated_at.and_utc(),
            is_published: article.is_published,
            is_recent,
        }
    }
}

/// Lists one page of published articles.
///
/// Pages past the end are reported as missing, except the first one.
pub fn load_articles<R>(repo: &R, query: ArticleQuery) -> ServiceResult<Paginated<ArticleListItem>>
where
    R: ArticleReader + ?Sized,
{
    let ArticleQuery {
        search,
        ordering,
        page,
        page_size,
    } = query;

    let pagination = Pagination::new(page, page_size);
    if pagination.page == 0 || pagination.offset().is_none() {
        return Err(ServiceError::NotFound);
    }

    let ordering = SortOrder::parse_or(ordering.as_deref(), default_article_ordering());
    let mut list_query = ArticleListQuery::new()
        .order_by(ordering)
        .paginate(pagination);

    if let Some(term) = search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
        list_query = list_query.search(term);
    }

    let (total, articles) = repo.list_articles(list_query)?;
    if !pagination.is_within(total) {
        return Err(ServiceError::NotFound);
    }

    let now = Utc::now().naive_utc();
    Ok(Paginated::new(articles, total, pagination).map(|article| ArticleListItem::new(article, now)))
}

/// Fetches a published article with its approved comments.
pub fn load_article<R>(repo: &R, article_id: i32) -> ServiceResult<ArticleDetail>
where
    R: ArticleReader + CommentReader + ?Sized,
{
    let article = find_published_article(repo, article_id)?;
    let comments = load_approved_comments(repo, article_id)?;

    Ok(ArticleDetail::new(article, comments, Utc::now().naive_utc()))
}

/// Creates an article and resolves its tags.
pub fn create_article<R>(repo: &R, form: ArticleForm) -> ServiceResult<ArticleDetail>
where
    R: ArticleWriter + ?Sized,
{
    let now = Utc::now().naive_utc();
    let new_article = form.into_new_article(now)?;

    let article = repo.create_article(&new_article)?;
    log::info!("Article created: {} - {}", article.id, article.title);

    Ok(ArticleDetail::new(article, Vec::new(), now))
}

/// Updates a published article. Tags are replaced only when supplied.
pub fn modify_article<R>(
    repo: &R,
    article_id: i32,
    form: ArticleForm,
    mode: UpdateMode,
) -> ServiceResult<ArticleDetail>
where
    R: ArticleReader + ArticleWriter + CommentReader + ?Sized,
{
    find_published_article(repo, article_id)?;

    let now = Utc::now().naive_utc();
    let update = form.into_update_article(mode, now)?;

    let article = repo.update_article(article_id, &update)?;
    log::info!("Article updated: {} - {}", article.id, article.title);

    let comments = load_approved_comments(repo, article_id)?;
    Ok(ArticleDetail::new(article, comments, now))
}

/// Deletes a published article together with its comments.
pub fn remove_article<R>(repo: &R, article_id: i32) -> ServiceResult<()>
where
    R: ArticleReader + ArticleWriter + ?Sized,
{
    let article = find_published_article(repo, article_id)?;

    repo.delete_article(article_id)?;
    log::info!("Article deleted: {} - {}", article.id, article.title);

    Ok(())
}

/// Resolves an article visible through the public routes.
pub fn find_published_article<R>(repo: &R, article_id: i32) -> ServiceResult<Article>
where
    R: ArticleReader + ?Sized,
{
    match repo.get_article_by_id(article_id)? {
        Some(article) if article.is_published => Ok(article),
        _ => Err(ServiceError::NotFound),
    }
}

fn load_approved_comments<R>(repo: &R, article_id: i32) -> ServiceResult<Vec<CommentView>>
where
    R: CommentReader + ?Sized,
{
    let comments = repo.list_comments(CommentListQuery::new(article_id))?;
    Ok(comments.into_iter().map(CommentView::from).collect())
}
