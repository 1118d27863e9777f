use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::article::{ArticleListQuery, default_article_ordering};
use crate::domain::ordering::SortOrder;
use crate::domain::tag::{Tag, TagListQuery};
use crate::domain::validation::ValidationError;
use crate::forms::UpdateMode;
use crate::forms::tags::TagForm;
use crate::repository::{ArticleReader, TagReader, TagWriter};
use crate::services::articles::ArticleListItem;
use crate::services::{ServiceError, ServiceResult};

const DUPLICATE_TAG_MESSAGE: &str = "tag with this name already exists.";

/// Query parameters accepted by the tag list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TagQuery {
    /// Optional case-insensitive search applied to tag names.
    pub search: Option<String>,
    /// `name` or `created_at`, optionally prefixed with `-`.
    pub ordering: Option<String>,
}

/// Query parameters accepted by the articles-of-a-tag endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TagArticlesQuery {
    pub ordering: Option<String>,
}

/// Public representation of a tag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagView {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Tag> for TagView {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            created_at: tag.created_at.and_utc(),
        }
    }
}

/// Lists every tag matching the optional search.
pub fn load_tags<R>(repo: &R, query: TagQuery) -> ServiceResult<Vec<TagView>>
where
    R: TagReader + ?Sized,
{
    let TagQuery { search, ordering } = query;

    let default_order = TagListQuery::new().ordering;
    let mut list_query =
        TagListQuery::new().order_by(SortOrder::parse_or(ordering.as_deref(), default_order));

    if let Some(term) = search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
        list_query = list_query.search(term);
    }

    let tags = repo.list_tags(list_query)?;

    Ok(tags.into_iter().map(TagView::from).collect())
}

/// Fetches a single tag.
pub fn load_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<TagView>
where
    R: TagReader + ?Sized,
{
    repo.get_tag_by_id(tag_id)?
        .map(TagView::from)
        .ok_or(ServiceError::NotFound)
}

/// Creates a tag from the submitted name.
pub fn create_tag<R>(repo: &R, form: TagForm) -> ServiceResult<TagView>
where
    R: TagWriter + ?Sized,
{
    let new_tag = form.into_new_tag(Utc::now().naive_utc())?;

    let tag = repo.create_tag(&new_tag).map_err(|err| duplicate_name(err.into()))?;
    log::info!("Tag created: {} - {}", tag.id, tag.name);

    Ok(tag.into())
}

/// Renames a tag. A partial update without a name returns the tag unchanged.
pub fn modify_tag<R>(
    repo: &R,
    tag_id: i32,
    form: TagForm,
    mode: UpdateMode,
) -> ServiceResult<TagView>
where
    R: TagReader + TagWriter + ?Sized,
{
    let Some(update) = form.into_update_tag(mode)? else {
        return load_tag(repo, tag_id);
    };

    let tag = repo
        .update_tag(tag_id, &update)
        .map_err(|err| duplicate_name(err.into()))?;
    log::info!("Tag updated: {} - {}", tag.id, tag.name);

    Ok(tag.into())
}

/// Deletes a tag and detaches it from its articles.
pub fn remove_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<()>
where
    R: TagWriter + ?Sized,
{
    repo.delete_tag(tag_id)?;
    log::info!("Tag deleted: {tag_id}");

    Ok(())
}

/// Lists the published articles carrying a tag.
pub fn load_tag_articles<R>(
    repo: &R,
    tag_id: i32,
    query: TagArticlesQuery,
) -> ServiceResult<Vec<ArticleListItem>>
where
    R: TagReader + ArticleReader + ?Sized,
{
    if repo.get_tag_by_id(tag_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let ordering = SortOrder::parse_or(query.ordering.as_deref(), default_article_ordering());
    let list_query = ArticleListQuery::new().tagged(tag_id).order_by(ordering);

    let (_, articles) = repo.list_articles(list_query)?;
    let now = Utc::now().naive_utc();

    Ok(articles
        .into_iter()
        .map(|article| ArticleListItem::new(article, now))
        .collect())
}

// The name is the only unique column of a tag.
fn duplicate_name(err: ServiceError) -> ServiceError {
    match err {
        ServiceError::Conflict(_) => {
            ServiceError::Validation(ValidationError::field("name", DUPLICATE_TAG_MESSAGE))
        }
        other => other,
    }
}
