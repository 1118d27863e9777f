use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::article::{NewArticle, TITLE_MAX_LEN, UpdateArticle};
use crate::domain::validation::REQUIRED_MESSAGE;
use crate::forms::{FormResult, UpdateMode, input_errors, trim_input};

const TITLE_MAX_LEN_VALIDATOR: u64 = TITLE_MAX_LEN as u64;

/// Tag descriptor nested in an article payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagInput {
    /// Proposed tag name; blank names are ignored.
    #[serde(default)]
    pub name: String,
}

impl TagInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// JSON payload used to create or update an article.
///
/// `tags` keeps "omitted" (`None`) apart from "empty" (`Some(vec![])`): on
/// update the former leaves the associations alone, the latter clears them.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ArticleForm {
    #[validate(length(
        max = TITLE_MAX_LEN_VALIDATOR,
        message = "Ensure this field has no more than 200 characters."
    ))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<TagInput>>,
    pub is_published: Option<bool>,
}

impl ArticleForm {
    /// Validates the payload into a domain `NewArticle`.
    pub fn into_new_article(self, now: NaiveDateTime) -> FormResult<NewArticle> {
        let form = self.trimmed();
        let mut errors = input_errors(&form);

        if form.title.is_none() {
            errors.add("title", REQUIRED_MESSAGE);
        }
        if form.content.is_none() {
            errors.add("content", REQUIRED_MESSAGE);
        }

        let ArticleForm {
            title,
            content,
            tags,
            is_published,
        } = form;

        let mut new_article =
            NewArticle::new(title.unwrap_or_default(), content.unwrap_or_default(), now)
                .published(is_published.unwrap_or(true))
                .with_tags(tag_names(tags.unwrap_or_default()));

        if let Err(err) = new_article.validate() {
            errors.merge(err);
        }
        errors.into_result()?;

        Ok(new_article)
    }

    /// Validates the payload into a domain `UpdateArticle`.
    ///
    /// In [`UpdateMode::Full`] the title and the content are required.
    pub fn into_update_article(
        self,
        mode: UpdateMode,
        now: NaiveDateTime,
    ) -> FormResult<UpdateArticle> {
        let form = self.trimmed();
        let mut errors = input_errors(&form);

        if mode == UpdateMode::Full {
            if form.title.is_none() {
                errors.add("title", REQUIRED_MESSAGE);
            }
            if form.content.is_none() {
                errors.add("content", REQUIRED_MESSAGE);
            }
        }

        let ArticleForm {
            title,
            content,
            tags,
            is_published,
        } = form;

        let mut update = UpdateArticle {
            title,
            content,
            is_published,
            tags: tags.map(tag_names),
            updated_at: now,
        };

        if let Err(err) = update.validate() {
            errors.merge(err);
        }
        errors.into_result()?;

        Ok(update)
    }

    fn trimmed(self) -> Self {
        Self {
            title: trim_input(self.title),
            content: trim_input(self.content),
            ..self
        }
    }
}

fn tag_names(tags: Vec<TagInput>) -> Vec<String> {
    tags.into_iter().map(|tag| tag.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn form(title: &str, content: &str) -> ArticleForm {
        ArticleForm {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            ..ArticleForm::default()
        }
    }

    #[test]
    fn new_article_defaults_to_published_without_tags() {
        let new_article = form("  Hello world ", " Plenty of content here ")
            .into_new_article(fixed_datetime())
            .expect("expected conversion to succeed");

        assert_eq!(new_article.title, "Hello world");
        assert_eq!(new_article.content, "Plenty of content here");
        assert!(new_article.is_published);
        assert!(new_article.tags.is_empty());
        assert_eq!(new_article.created_at, fixed_datetime());
    }

    #[test]
    fn missing_fields_are_required() {
        let err = ArticleForm::default()
            .into_new_article(fixed_datetime())
            .expect_err("empty payload");

        assert_eq!(err.messages("title"), [REQUIRED_MESSAGE.to_string()]);
        assert_eq!(err.messages("content"), [REQUIRED_MESSAGE.to_string()]);
    }

    #[test]
    fn title_length_limits() {
        let err = form("Hi", "Plenty of content here")
            .into_new_article(fixed_datetime())
            .expect_err("short title");
        assert_eq!(
            err.messages("title"),
            ["Title must be at least 3 characters long.".to_string()]
        );

        let err = form(&"t".repeat(201), "Plenty of content here")
            .into_new_article(fixed_datetime())
            .expect_err("long title");
        assert_eq!(
            err.messages("title"),
            ["Ensure this field has no more than 200 characters.".to_string()]
        );

        let padded = format!("  {}  ", "t".repeat(200));
        assert!(
            form(&padded, "Plenty of content here")
                .into_new_article(fixed_datetime())
                .is_ok()
        );
    }

    #[test]
    fn duplicate_tags_are_rejected() {
        let mut payload = form("Hello", "Plenty of content here");
        payload.tags = Some(vec![TagInput::new("Go"), TagInput::new("go ")]);

        let err = payload
            .into_new_article(fixed_datetime())
            .expect_err("duplicate tags");

        assert_eq!(
            err.messages("tags"),
            ["Duplicate tag names are not allowed.".to_string()]
        );
    }

    #[test]
    fn tags_are_normalized_and_blank_ones_dropped() {
        let mut payload = form("Hello", "Plenty of content here");
        payload.tags = Some(vec![
            TagInput::new(" Rust "),
            TagInput::new(""),
            TagInput::new("WebDev"),
        ]);
        payload.is_published = Some(false);

        let new_article = payload
            .into_new_article(fixed_datetime())
            .expect("valid payload");

        assert_eq!(new_article.tags, vec!["rust".to_string(), "webdev".to_string()]);
        assert!(!new_article.is_published);
    }

    #[test]
    fn partial_update_keeps_omitted_fields() {
        let payload = ArticleForm {
            content: Some("  Revised content body ".to_string()),
            ..ArticleForm::default()
        };

        let update = payload
            .into_update_article(UpdateMode::Partial, fixed_datetime())
            .expect("valid patch");

        assert_eq!(update.title, None);
        assert_eq!(update.content.as_deref(), Some("Revised content body"));
        assert_eq!(update.tags, None);
        assert_eq!(update.updated_at, fixed_datetime());
    }

    #[test]
    fn explicit_empty_tags_survive_conversion() {
        let payload = ArticleForm {
            tags: Some(Vec::new()),
            ..ArticleForm::default()
        };

        let update = payload
            .into_update_article(UpdateMode::Partial, fixed_datetime())
            .expect("valid patch");

        assert_eq!(update.tags, Some(Vec::new()));
    }

    #[test]
    fn full_update_requires_title_and_content() {
        let payload = ArticleForm {
            title: Some("New title".to_string()),
            ..ArticleForm::default()
        };

        let err = payload
            .into_update_article(UpdateMode::Full, fixed_datetime())
            .expect_err("missing content");

        assert!(!err.has_field("title"));
        assert_eq!(err.messages("content"), [REQUIRED_MESSAGE.to_string()]);
    }

    #[test]
    fn deserializes_null_tags_as_omitted() {
        let payload: ArticleForm =
            serde_json::from_str(r#"{"title": "Hello", "tags": null}"#).expect("valid json");
        assert!(payload.tags.is_none());

        let payload: ArticleForm =
            serde_json::from_str(r#"{"tags": [{"name": "rust"}, {}]}"#).expect("valid json");
        let tags = payload.tags.expect("tags present");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].name, "");
    }
}
