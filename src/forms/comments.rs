use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::comment::{AUTHOR_NAME_MAX_LEN, Comment, NewComment, UpdateComment};
use crate::domain::validation::REQUIRED_MESSAGE;
use crate::forms::{FormResult, UpdateMode, input_errors, trim_input};

const AUTHOR_NAME_MAX_LEN_VALIDATOR: u64 = AUTHOR_NAME_MAX_LEN as u64;

/// JSON payload used to post a comment on an article.
///
/// Moderation state is not accepted here; new comments are always approved.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CommentForm {
    pub content: Option<String>,
    #[validate(length(
        max = AUTHOR_NAME_MAX_LEN_VALIDATOR,
        message = "Ensure this field has no more than 100 characters."
    ))]
    pub author_name: Option<String>,
}

impl CommentForm {
    /// Validates the payload into a domain `NewComment` for `article_id`.
    pub fn into_new_comment(self, article_id: i32, now: NaiveDateTime) -> FormResult<NewComment> {
        let form = CommentForm {
            content: trim_input(self.content),
            author_name: trim_input(self.author_name),
        };
        let mut errors = input_errors(&form);

        if form.content.is_none() {
            errors.add("content", REQUIRED_MESSAGE);
        }

        let mut new_comment = NewComment::new(article_id, form.content.unwrap_or_default(), now);
        if let Some(author_name) = form.author_name {
            new_comment = new_comment.with_author(author_name);
        }

        if let Err(err) = new_comment.validate() {
            errors.merge(err);
        }
        errors.into_result()?;

        Ok(new_comment)
    }
}

/// JSON payload used to edit or moderate an existing comment.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditCommentForm {
    pub content: Option<String>,
    #[validate(length(
        max = AUTHOR_NAME_MAX_LEN_VALIDATOR,
        message = "Ensure this field has no more than 100 characters."
    ))]
    pub author_name: Option<String>,
    pub is_approved: Option<bool>,
}

impl EditCommentForm {
    /// Validates the payload into a domain `UpdateComment`.
    ///
    /// A full update requires `content` and resets a missing author to
    /// `Anonymous`. A partial update takes omitted fields from `current`.
    pub fn into_update_comment(
        self,
        mode: UpdateMode,
        current: &Comment,
    ) -> FormResult<UpdateComment> {
        let form = EditCommentForm {
            content: trim_input(self.content),
            author_name: trim_input(self.author_name),
            is_approved: self.is_approved,
        };
        let mut errors = input_errors(&form);

        let (content, author_name) = match mode {
            UpdateMode::Full => {
                if form.content.is_none() {
                    errors.add("content", REQUIRED_MESSAGE);
                }
                (
                    form.content.unwrap_or_default(),
                    form.author_name.unwrap_or_default(),
                )
            }
            UpdateMode::Partial => (
                form.content.unwrap_or_else(|| current.content.clone()),
                form.author_name
                    .unwrap_or_else(|| current.author_name.clone()),
            ),
        };

        let mut update = UpdateComment::new(content, author_name);
        if let Some(is_approved) = form.is_approved {
            update = update.approved(is_approved);
        }

        if let Err(err) = update.validate() {
            errors.merge(err);
        }
        errors.into_result()?;

        Ok(update)
    }
}
