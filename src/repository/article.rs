use std::collections::HashMap;

use diesel::dsl::count;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::article::{
    Article as DomainArticle, ArticleListQuery, ArticleSort, NewArticle as DomainNewArticle,
    UpdateArticle as DomainUpdateArticle,
};
use crate::domain::ordering::SortDirection;
use crate::domain::tag::Tag as DomainTag;
use crate::models::article::{
    Article as DbArticle, NewArticle as DbNewArticle, UpdateArticle as DbUpdateArticle,
};
use crate::models::article_tag::ArticleTag as DbArticleTag;
use crate::models::tag::Tag as DbTag;
use crate::repository::tag::{attach_tags, like_pattern};
use crate::repository::{
    ArticleReader, ArticleWriter, DieselRepository, RepositoryError, RepositoryResult,
};

impl ArticleReader for DieselRepository {
    fn get_article_by_id(&self, id: i32) -> RepositoryResult<Option<DomainArticle>> {
        use crate::schema::articles;

        let mut conn = self.conn()?;
        let article = articles::table
            .find(id)
            .first::<DbArticle>(&mut conn)
            .optional()?;

        let Some(article) = article else {
            return Ok(None);
        };

        Ok(hydrate_articles(&mut conn, vec![article])?.pop())
    }

    fn list_articles(
        &self,
        query: ArticleListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainArticle>)> {
        use crate::schema::{article_tags, articles};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = articles::table
                .filter(articles::is_published.eq(true))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(tag_id) = query.tag_id {
                items = items.filter(
                    articles::id.eq_any(
                        article_tags::table
                            .filter(article_tags::tag_id.eq(tag_id))
                            .select(article_tags::article_id),
                    ),
                );
            }

            if let Some(search) = query.search.as_deref() {
                for term in search.split_whitespace() {
                    let pattern = like_pattern(term);
                    items = items.filter(
                        articles::title
                            .like(pattern.clone())
                            .escape('\\')
                            .or(articles::content.like(pattern).escape('\\')),
                    );
                }
            }

            items
        };

        // Get the total count before applying pagination
        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = match (query.ordering.field, query.ordering.direction) {
            (ArticleSort::CreatedAt, SortDirection::Asc) => {
                query_builder().order((articles::created_at.asc(), articles::id.asc()))
            }
            (ArticleSort::CreatedAt, SortDirection::Desc) => {
                query_builder().order((articles::created_at.desc(), articles::id.desc()))
            }
            (ArticleSort::UpdatedAt, SortDirection::Asc) => {
                query_builder().order((articles::updated_at.asc(), articles::id.asc()))
            }
            (ArticleSort::UpdatedAt, SortDirection::Desc) => {
                query_builder().order((articles::updated_at.desc(), articles::id.desc()))
            }
            (ArticleSort::Title, SortDirection::Asc) => {
                query_builder().order((articles::title.asc(), articles::id.asc()))
            }
            (ArticleSort::Title, SortDirection::Desc) => {
                query_builder().order((articles::title.desc(), articles::id.desc()))
            }
        };

        if let Some(pagination) = &query.pagination {
            let Some(offset) = pagination.offset() else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(pagination.limit());
        }

        let db_articles = items.load::<DbArticle>(&mut conn)?;

        Ok((total, hydrate_articles(&mut conn, db_articles)?))
    }
}

impl ArticleWriter for DieselRepository {
    fn create_article(&self, new_article: &DomainNewArticle) -> RepositoryResult<DomainArticle> {
        use crate::schema::articles;

        let mut conn = self.conn()?;
        let insertable = DbNewArticle::from(new_article);

        conn.immediate_transaction::<DomainArticle, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(articles::table)
                .values(&insertable)
                .get_result::<DbArticle>(conn)?;

            attach_tags(conn, created.id, &new_article.tags)?;

            hydrate_article(conn, created)
        })
    }

    fn update_article(
        &self,
        article_id: i32,
        updates: &DomainUpdateArticle,
    ) -> RepositoryResult<DomainArticle> {
        use crate::schema::{article_tags, articles};

        let mut conn = self.conn()?;
        let db_updates = DbUpdateArticle::from(updates);

        conn.immediate_transaction::<DomainArticle, RepositoryError, _>(|conn| {
            let updated = diesel::update(articles::table.filter(articles::id.eq(article_id)))
                .set(&db_updates)
                .get_result::<DbArticle>(conn)?;

            if let Some(tags) = &updates.tags {
                diesel::delete(
                    article_tags::table.filter(article_tags::article_id.eq(article_id)),
                )
                .execute(conn)?;

                attach_tags(conn, article_id, tags)?;
            }

            hydrate_article(conn, updated)
        })
    }

    fn delete_article(&self, article_id: i32) -> RepositoryResult<()> {
        use crate::schema::{article_tags, articles, comments};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            // Dependent rows go first; the foreign keys cascade as well.
            diesel::delete(comments::table.filter(comments::article_id.eq(article_id)))
                .execute(conn)?;
            diesel::delete(article_tags::table.filter(article_tags::article_id.eq(article_id)))
                .execute(conn)?;

            let deleted =
                diesel::delete(articles::table.filter(articles::id.eq(article_id))).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

fn hydrate_article(
    conn: &mut SqliteConnection,
    article: DbArticle,
) -> RepositoryResult<DomainArticle> {
    hydrate_articles(conn, vec![article])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

/// Convert rows to domain articles with their tags and approved comment counts.
fn hydrate_articles(
    conn: &mut SqliteConnection,
    db_articles: Vec<DbArticle>,
) -> RepositoryResult<Vec<DomainArticle>> {
    if db_articles.is_empty() {
        return Ok(Vec::new());
    }

    let article_ids: Vec<i32> = db_articles.iter().map(|article| article.id).collect();
    let mut tag_map = load_tags_for_articles(conn, &db_articles)?;
    let count_map = load_approved_comment_counts(conn, &article_ids)?;

    let mut articles = Vec::with_capacity(db_articles.len());
    for db_article in db_articles {
        let mut domain: DomainArticle = db_article.into();
        domain.tags = tag_map.remove(&domain.id).unwrap_or_default();
        domain.comments_count = count_map.get(&domain.id).copied().unwrap_or_default();
        articles.push(domain);
    }

    Ok(articles)
}

fn load_tags_for_articles(
    conn: &mut SqliteConnection,
    db_articles: &[DbArticle],
) -> RepositoryResult<HashMap<i32, Vec<DomainTag>>> {
    use crate::schema::{article_tags, tags};

    let rows = DbArticleTag::belonging_to(db_articles)
        .inner_join(tags::table)
        .order(article_tags::id.asc())
        .select((DbArticleTag::as_select(), DbTag::as_select()))
        .load::<(DbArticleTag, DbTag)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTag>> = HashMap::new();
    for (link, tag) in rows {
        map.entry(link.article_id).or_default().push(tag.into());
    }

    Ok(map)
}

fn load_approved_comment_counts(
    conn: &mut SqliteConnection,
    article_ids: &[i32],
) -> RepositoryResult<HashMap<i32, usize>> {
    use crate::schema::comments;

    let rows = comments::table
        .filter(comments::article_id.eq_any(article_ids))
        .filter(comments::is_approved.eq(true))
        .group_by(comments::article_id)
        .select((comments::article_id, count(comments::id)))
        .load::<(i32, i64)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(article_id, total)| (article_id, total as usize))
        .collect())
}
