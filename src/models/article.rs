use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::article::{
    Article as DomainArticle, NewArticle as DomainNewArticle, UpdateArticle as DomainUpdateArticle,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::articles)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::articles)]
pub struct NewArticle<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// `None` fields are left out of the `UPDATE`; `updated_at` is always set.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::articles)]
pub struct UpdateArticle<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub is_published: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<Article> for DomainArticle {
    fn from(value: Article) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            is_published: value.is_published,
            created_at: value.created_at,
            updated_at: value.updated_at,
            tags: Vec::new(),
            comments_count: 0,
        }
    }
}

impl<'a> From<&'a DomainNewArticle> for NewArticle<'a> {
    fn from(value: &'a DomainNewArticle) -> Self {
        Self {
            title: value.title.as_str(),
            content: value.content.as_str(),
            is_published: value.is_published,
            created_at: value.created_at,
            updated_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateArticle> for UpdateArticle<'a> {
    fn from(value: &'a DomainUpdateArticle) -> Self {
        Self {
            title: value.title.as_deref(),
            content: value.content.as_deref(),
            is_published: value.is_published,
            updated_at: value.updated_at,
        }
    }
}
