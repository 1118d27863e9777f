use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::ordering::{SortField, SortOrder};
use crate::domain::tag::{Tag, prepare_tag_names};
use crate::domain::validation::{ValidationError, char_len, trim_in_place};
use crate::pagination::Pagination;

/// Minimum length of a trimmed article title.
pub const TITLE_MIN_LEN: usize = 3;
/// Maximum length of an article title.
pub const TITLE_MAX_LEN: usize = 200;
/// Minimum length of trimmed article content.
pub const CONTENT_MIN_LEN: usize = 10;
/// Age, in whole days, below which an article counts as recent.
pub const RECENT_DAYS: i64 = 7;

/// Domain representation of a blog article with its tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    /// Unique identifier of the article.
    pub id: i32,
    /// Trimmed title.
    pub title: String,
    /// Trimmed body text.
    pub content: String,
    /// Whether the article is visible through the public read paths.
    pub is_published: bool,
    /// Timestamp for when the article was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last successful mutation.
    pub updated_at: NaiveDateTime,
    /// Attached tags in the order they were associated.
    pub tags: Vec<Tag>,
    /// Number of approved comments.
    pub comments_count: usize,
}

impl Article {
    /// Whether the article was created less than [`RECENT_DAYS`] days before `now`.
    pub fn is_recent(&self, now: NaiveDateTime) -> bool {
        (now - self.created_at).num_days() < RECENT_DAYS
    }
}

/// Payload required to insert a new article together with its tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub is_published: bool,
    /// Proposed tag names; normalized and filtered by [`NewArticle::validate`].
    pub tags: Vec<String>,
    /// Creation timestamp, also used as the first `updated_at`.
    pub created_at: NaiveDateTime,
}

impl NewArticle {
    /// Build a published article payload without tags.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            is_published: true,
            tags: Vec::new(),
            created_at,
        }
    }

    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Normalize the payload in place and check the article invariants.
    ///
    /// Title and content are trimmed; tag names are normalized, checked for
    /// duplicates and stripped of blank entries.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        if let Err(message) = normalize_title(&mut self.title) {
            errors.add("title", message);
        }
        if let Err(message) = normalize_content(&mut self.content) {
            errors.add("content", message);
        }
        match prepare_tag_names(self.tags.iter().map(String::as_str)) {
            Ok(tags) => self.tags = tags,
            Err(err) => errors.merge(err),
        }

        errors.into_result()
    }
}

/// Patch data applied when updating an existing article.
///
/// `None` leaves the stored value untouched. For `tags` this matters:
/// `Some(vec![])` removes every association while `None` keeps them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_published: Option<bool>,
    pub tags: Option<Vec<String>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateArticle {
    /// Create a patch with no changes applied yet.
    pub fn new(updated_at: NaiveDateTime) -> Self {
        Self {
            title: None,
            content: None,
            is_published: None,
            tags: None,
            updated_at,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = Some(is_published);
        self
    }

    /// Replace the tag associations with `tags`, which may be empty.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Normalize and check the fields present in the patch.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        if let Some(Err(message)) = self.title.as_mut().map(normalize_title) {
            errors.add("title", message);
        }
        if let Some(Err(message)) = self.content.as_mut().map(normalize_content) {
            errors.add("content", message);
        }
        if let Some(tags) = self.tags.as_mut() {
            match prepare_tag_names(tags.iter().map(String::as_str)) {
                Ok(prepared) => *tags = prepared,
                Err(err) => errors.merge(err),
            }
        }

        errors.into_result()
    }
}

/// Columns the article list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleSort {
    CreatedAt,
    UpdatedAt,
    Title,
}

impl SortField for ArticleSort {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            "title" => Some(Self::Title),
            _ => None,
        }
    }
}

/// Default ordering of article lists: newest first.
pub fn default_article_ordering() -> SortOrder<ArticleSort> {
    SortOrder::desc(ArticleSort::CreatedAt)
}

/// Query definition used to list published articles.
#[derive(Debug, Clone)]
pub struct ArticleListQuery {
    /// Whitespace separated terms; each must match the title or the content.
    pub search: Option<String>,
    /// Restrict the list to articles carrying this tag.
    pub tag_id: Option<i32>,
    /// Requested ordering.
    pub ordering: SortOrder<ArticleSort>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for ArticleListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleListQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            tag_id: None,
            ordering: default_article_ordering(),
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn tagged(mut self, tag_id: i32) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    pub fn order_by(mut self, ordering: SortOrder<ArticleSort>) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

fn normalize_title(title: &mut String) -> Result<(), &'static str> {
    trim_in_place(title);
    if title.is_empty() {
        return Err("Title cannot be empty.");
    }
    if char_len(title) < TITLE_MIN_LEN {
        return Err("Title must be at least 3 characters long.");
    }
    Ok(())
}

fn normalize_content(content: &mut String) -> Result<(), &'static str> {
    trim_in_place(content);
    if content.is_empty() {
        return Err("Content cannot be empty.");
    }
    if char_len(content) < CONTENT_MIN_LEN {
        return Err("Content must be at least 10 characters long.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn fixed_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default()
    }

    fn sample_article(created_at: NaiveDateTime) -> Article {
        Article {
            id: 1,
            title: "Hello".to_string(),
            content: "Some article body".to_string(),
            is_published: true,
            created_at,
            updated_at: created_at,
            tags: Vec::new(),
            comments_count: 0,
        }
    }

    #[test]
    fn title_minimum_is_three_characters() {
        let mut short = NewArticle::new("Hi", "Long enough content", fixed_datetime());
        let err = short.validate().expect_err("two character title");
        assert!(err.has_field("title"));
        assert!(!err.has_field("content"));

        let mut ok = NewArticle::new("Hi!", "Long enough content", fixed_datetime());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn fields_are_trimmed_before_checks() {
        let mut article = NewArticle::new("  Hi!  ", "\n Long enough content \t", fixed_datetime());

        article.validate().expect("valid article");

        assert_eq!(article.title, "Hi!");
        assert_eq!(article.content, "Long enough content");

        let mut padded = NewArticle::new("  Hi  ", "Long enough content", fixed_datetime());
        assert!(padded.validate().is_err());
    }

    #[test]
    fn reports_every_invalid_field() {
        let mut article = NewArticle::new("   ", "too short", fixed_datetime());

        let err = article.validate().expect_err("invalid article");

        assert_eq!(err.messages("title"), ["Title cannot be empty.".to_string()]);
        assert_eq!(
            err.messages("content"),
            ["Content must be at least 10 characters long.".to_string()]
        );
    }

    #[test]
    fn tag_names_are_prepared() {
        let mut article = NewArticle::new("Title", "Long enough content", fixed_datetime())
            .with_tags(["Rust", " ", "WEB "]);

        article.validate().expect("valid article");

        assert_eq!(article.tags, vec!["rust".to_string(), "web".to_string()]);

        let mut duplicated = NewArticle::new("Title", "Long enough content", fixed_datetime())
            .with_tags(["Go", "go "]);
        let err = duplicated.validate().expect_err("duplicate tags");
        assert!(err.has_field("tags"));
    }

    #[test]
    fn update_only_checks_present_fields() {
        let mut empty = UpdateArticle::new(fixed_datetime());
        assert!(empty.validate().is_ok());

        let mut patch = UpdateArticle::new(fixed_datetime())
            .content("  A much longer body  ")
            .tags(Vec::<String>::new());
        patch.validate().expect("valid patch");
        assert_eq!(patch.content.as_deref(), Some("A much longer body"));
        assert_eq!(patch.tags, Some(Vec::new()));

        let mut bad = UpdateArticle::new(fixed_datetime()).title("Hi");
        assert!(bad.validate().is_err());
    }

    #[test]
    fn recent_means_less_than_seven_days() {
        let created_at = fixed_datetime();
        let article = sample_article(created_at);

        assert!(article.is_recent(created_at + Duration::days(6) + Duration::hours(23)));
        assert!(!article.is_recent(created_at + Duration::days(7)));
    }

    #[test]
    fn list_query_defaults_to_newest_first() {
        let query = ArticleListQuery::new();

        assert_eq!(query.ordering, SortOrder::desc(ArticleSort::CreatedAt));
        assert!(query.tag_id.is_none());
        assert!(query.pagination.is_none());
    }
}
