use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::ordering::{SortField, SortOrder};
use crate::domain::validation::{ValidationError, char_len, trim_in_place};

/// Minimum length of trimmed comment content.
pub const COMMENT_MIN_LEN: usize = 5;
/// Maximum length of an author name.
pub const AUTHOR_NAME_MAX_LEN: usize = 100;
/// Author name stored when none is given.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Domain representation of a comment left on an article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// Unique identifier of the comment.
    pub id: i32,
    /// Identifier of the article the comment belongs to.
    pub article_id: i32,
    /// Trimmed comment text.
    pub content: String,
    /// Display name of the author, `Anonymous` when none was given.
    pub author_name: String,
    /// Timestamp for when the comment was created.
    pub created_at: NaiveDateTime,
    /// Moderation flag; only approved comments are exposed by read paths.
    pub is_approved: bool,
}

/// Payload required to insert a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub article_id: i32,
    pub content: String,
    pub author_name: String,
    pub is_approved: bool,
    pub created_at: NaiveDateTime,
}

impl NewComment {
    /// Build an approved, anonymous comment payload.
    pub fn new(article_id: i32, content: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            article_id,
            content: content.into(),
            author_name: ANONYMOUS_AUTHOR.to_string(),
            is_approved: true,
            created_at,
        }
    }

    pub fn with_author(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = author_name.into();
        self
    }

    /// Normalize the payload in place and check the comment invariants.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        normalize_author_name(&mut self.author_name);
        normalize_content(&mut self.content)
            .map_err(|message| ValidationError::field("content", message))
    }
}

/// Replacement data applied when editing a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateComment {
    pub content: String,
    pub author_name: String,
    /// `None` keeps the current moderation flag.
    pub is_approved: Option<bool>,
}

impl UpdateComment {
    pub fn new(content: impl Into<String>, author_name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author_name: author_name.into(),
            is_approved: None,
        }
    }

    pub fn approved(mut self, is_approved: bool) -> Self {
        self.is_approved = Some(is_approved);
        self
    }

    /// Normalize the payload in place and check the comment invariants.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        normalize_author_name(&mut self.author_name);
        normalize_content(&mut self.content)
            .map_err(|message| ValidationError::field("content", message))
    }
}

/// Columns a comment list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSort {
    CreatedAt,
}

impl SortField for CommentSort {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

/// Query definition used to list the comments of an article.
#[derive(Debug, Clone)]
pub struct CommentListQuery {
    pub article_id: i32,
    /// Restrict the list to approved comments. On by default.
    pub approved_only: bool,
    /// Requested ordering, oldest first by default.
    pub ordering: SortOrder<CommentSort>,
}

impl CommentListQuery {
    pub fn new(article_id: i32) -> Self {
        Self {
            article_id,
            approved_only: true,
            ordering: SortOrder::asc(CommentSort::CreatedAt),
        }
    }

    /// Include comments awaiting moderation. Only for administrative reads.
    pub fn include_unapproved(mut self) -> Self {
        self.approved_only = false;
        self
    }

    pub fn order_by(mut self, ordering: SortOrder<CommentSort>) -> Self {
        self.ordering = ordering;
        self
    }
}

fn normalize_content(content: &mut String) -> Result<(), &'static str> {
    trim_in_place(content);
    if content.is_empty() {
        return Err("Comment content cannot be empty.");
    }
    if char_len(content) < COMMENT_MIN_LEN {
        return Err("Comment must be at least 5 characters long.");
    }
    Ok(())
}

// Blank names are replaced, never rejected.
fn normalize_author_name(author_name: &mut String) {
    trim_in_place(author_name);
    if author_name.is_empty() {
        *author_name = ANONYMOUS_AUTHOR.to_string();
    }
}
