use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::comment::{
    Comment as DomainComment, NewComment as DomainNewComment, UpdateComment as DomainUpdateComment,
};

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::comments,
    belongs_to(super::article::Article, foreign_key = article_id)
)]
pub struct Comment {
    pub id: i32,
    pub article_id: i32,
    pub content: String,
    pub author_name: String,
    pub created_at: NaiveDateTime,
    pub is_approved: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment<'a> {
    pub article_id: i32,
    pub content: &'a str,
    pub author_name: &'a str,
    pub created_at: NaiveDateTime,
    pub is_approved: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::comments)]
pub struct UpdateComment<'a> {
    pub content: &'a str,
    pub author_name: &'a str,
    pub is_approved: Option<bool>,
}

impl From<Comment> for DomainComment {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id,
            article_id: value.article_id,
            content: value.content,
            author_name: value.author_name,
            created_at: value.created_at,
            is_approved: value.is_approved,
        }
    }
}

impl<'a> From<&'a DomainNewComment> for NewComment<'a> {
    fn from(value: &'a DomainNewComment) -> Self {
        Self {
            article_id: value.article_id,
            content: value.content.as_str(),
            author_name: value.author_name.as_str(),
            created_at: value.created_at,
            is_approved: value.is_approved,
        }
    }
}

impl<'a> From<&'a DomainUpdateComment> for UpdateComment<'a> {
    fn from(value: &'a DomainUpdateComment) -> Self {
        Self {
            content: value.content.as_str(),
            author_name: value.author_name.as_str(),
            is_approved: value.is_approved,
        }
    }
}
