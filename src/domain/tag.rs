use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::ordering::{SortField, SortOrder};
use crate::domain::validation::{ValidationError, char_len};

/// Minimum length of a normalized tag name.
pub const TAG_NAME_MIN_LEN: usize = 2;
/// Maximum length of a normalized tag name.
pub const TAG_NAME_MAX_LEN: usize = 50;

const EMPTY_NAME_MESSAGE: &str = "Tag name cannot be empty.";
const SHORT_NAME_MESSAGE: &str = "Tag name must be at least 2 characters long.";
const LONG_NAME_MESSAGE: &str = "Ensure this field has no more than 50 characters.";
const DUPLICATE_NAMES_MESSAGE: &str = "Duplicate tag names are not allowed.";

/// Domain representation of a tag that can be attached to many articles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Unique identifier of the tag.
    pub id: i32,
    /// Trimmed, lowercase and unique name of the tag.
    pub name: String,
    /// Timestamp for when the tag record was created.
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a new tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    /// Name of the tag, normalized by [`NewTag::validate`].
    pub name: String,
    /// Timestamp captured when the payload was created.
    pub created_at: NaiveDateTime,
}

impl NewTag {
    pub fn new(name: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            created_at,
        }
    }

    /// Normalize the name in place and check the tag invariants.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.name = normalize_tag_name(&self.name);
        check_tag_name(&self.name).map_err(|message| ValidationError::field("name", message))
    }
}

/// Patch data applied when renaming an existing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTag {
    /// New name of the tag, normalized by [`UpdateTag::validate`].
    pub name: String,
}

impl UpdateTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Normalize the name in place and check the tag invariants.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.name = normalize_tag_name(&self.name);
        check_tag_name(&self.name).map_err(|message| ValidationError::field("name", message))
    }
}

/// Columns the tag list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSort {
    Name,
    CreatedAt,
}

impl SortField for TagSort {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

/// Query definition used to list tags.
#[derive(Debug, Clone)]
pub struct TagListQuery {
    /// Optional case-insensitive substring search on the name.
    pub search: Option<String>,
    /// Requested ordering, `name` ascending by default.
    pub ordering: SortOrder<TagSort>,
}

impl Default for TagListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl TagListQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            ordering: SortOrder::asc(TagSort::Name),
        }
    }

    /// Filter the results by a search term applied to the tag name.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn order_by(mut self, ordering: SortOrder<TagSort>) -> Self {
        self.ordering = ordering;
        self
    }
}

/// Canonical form of a tag name: trimmed and lowercased.
pub fn normalize_tag_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check the invariants of an already normalized tag name.
pub fn check_tag_name(name: &str) -> Result<(), &'static str> {
    let len = char_len(name);
    if len == 0 {
        return Err(EMPTY_NAME_MESSAGE);
    }
    if len < TAG_NAME_MIN_LEN {
        return Err(SHORT_NAME_MESSAGE);
    }
    if len > TAG_NAME_MAX_LEN {
        return Err(LONG_NAME_MESSAGE);
    }
    Ok(())
}

/// Validate the tag names submitted with an article and return the names the
/// association step should resolve.
///
/// The whole list is rejected under the `tags` field when two entries share a
/// normalized name (blank entries included) or when a non-blank entry breaks
/// the tag invariants. Blank entries are then dropped without error.
pub fn prepare_tag_names<'a, I>(names: I) -> Result<Vec<String>, ValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let normalized: Vec<String> = names.into_iter().map(normalize_tag_name).collect();

    let mut seen = HashSet::with_capacity(normalized.len());
    if normalized.iter().any(|name| !seen.insert(name.as_str())) {
        return Err(ValidationError::field("tags", DUPLICATE_NAMES_MESSAGE));
    }

    let mut errors = ValidationError::new();
    for name in normalized.iter().filter(|name| !name.is_empty()) {
        if let Err(message) = check_tag_name(name) {
            errors.add("tags", message);
        }
    }
    errors.into_result()?;

    Ok(normalized
        .into_iter()
        .filter(|name| !name.is_empty())
        .collect())
}
