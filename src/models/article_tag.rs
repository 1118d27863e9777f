use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::article_tags,
    belongs_to(super::article::Article, foreign_key = article_id),
    belongs_to(super::tag::Tag, foreign_key = tag_id)
)]
pub struct ArticleTag {
    pub id: i32,
    pub article_id: i32,
    pub tag_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::article_tags)]
pub struct NewArticleTag {
    pub article_id: i32,
    pub tag_id: i32,
}

impl NewArticleTag {
    pub fn new(article_id: i32, tag_id: i32) -> Self {
        Self { article_id, tag_id }
    }
}
