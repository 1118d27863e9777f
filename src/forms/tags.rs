use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::tag::{NewTag, TAG_NAME_MAX_LEN, UpdateTag};
use crate::domain::validation::REQUIRED_MESSAGE;
use crate::forms::{FormResult, UpdateMode, input_errors, trim_input};

const NAME_MAX_LEN_VALIDATOR: u64 = TAG_NAME_MAX_LEN as u64;

/// JSON payload used to create or rename a tag.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TagForm {
    #[validate(length(
        max = NAME_MAX_LEN_VALIDATOR,
        message = "Ensure this field has no more than 50 characters."
    ))]
    pub name: Option<String>,
}

impl TagForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Validates and normalizes the payload into a domain `NewTag`.
    pub fn into_new_tag(self, now: NaiveDateTime) -> FormResult<NewTag> {
        let form = self.trimmed();
        let mut errors = input_errors(&form);

        let Some(name) = form.name else {
            errors.add("name", REQUIRED_MESSAGE);
            return Err(errors);
        };

        let mut new_tag = NewTag::new(name, now);
        if let Err(err) = new_tag.validate() {
            errors.merge(err);
        }
        errors.into_result()?;

        Ok(new_tag)
    }

    /// Validates the payload into a domain `UpdateTag`.
    ///
    /// A partial update without a name has nothing to change and yields `None`.
    pub fn into_update_tag(self, mode: UpdateMode) -> FormResult<Option<UpdateTag>> {
        let form = self.trimmed();
        let mut errors = input_errors(&form);

        let Some(name) = form.name else {
            if mode == UpdateMode::Partial {
                return errors.into_result().map(|()| None);
            }
            errors.add("name", REQUIRED_MESSAGE);
            return Err(errors);
        };

        let mut update = UpdateTag::new(name);
        if let Err(err) = update.validate() {
            errors.merge(err);
        }
        errors.into_result()?;

        Ok(Some(update))
    }

    fn trimmed(self) -> Self {
        Self {
            name: trim_input(self.name),
        }
    }
}
