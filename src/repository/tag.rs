use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;

use crate::domain::ordering::SortDirection;
use crate::domain::tag::{
    NewTag as DomainNewTag, Tag as DomainTag, TagListQuery, TagSort,
    UpdateTag as DomainUpdateTag, normalize_tag_name,
};
use crate::models::article_tag::NewArticleTag;
use crate::models::tag::{NewTag as DbNewTag, Tag as DbTag, UpdateTag as DbUpdateTag};
use crate::repository::{DieselRepository, RepositoryError, RepositoryResult, TagReader, TagWriter};

impl TagReader for DieselRepository {
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let tag = tags::table
            .find(id)
            .first::<DbTag>(&mut conn)
            .optional()?;

        Ok(tag.map(DomainTag::from))
    }

    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<Vec<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let mut items = tags::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(search) = query.search.as_deref() {
            for term in search.split_whitespace() {
                items = items.filter(tags::name.like(like_pattern(term)).escape('\\'));
            }
        }

        items = match (query.ordering.field, query.ordering.direction) {
            (TagSort::Name, SortDirection::Asc) => items.order(tags::name.asc()),
            (TagSort::Name, SortDirection::Desc) => items.order(tags::name.desc()),
            (TagSort::CreatedAt, SortDirection::Asc) => {
                items.order((tags::created_at.asc(), tags::id.asc()))
            }
            (TagSort::CreatedAt, SortDirection::Desc) => {
                items.order((tags::created_at.desc(), tags::id.desc()))
            }
        };

        let db_tags = items.load::<DbTag>(&mut conn)?;

        Ok(db_tags.into_iter().map(DomainTag::from).collect())
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(&self, new_tag: &DomainNewTag) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let insertable = DbNewTag::from(new_tag);

        let created = diesel::insert_into(tags::table)
            .values(&insertable)
            .get_result::<DbTag>(&mut conn)?;

        Ok(created.into())
    }

    fn update_tag(&self, tag_id: i32, updates: &DomainUpdateTag) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateTag::from(updates);

        let updated = diesel::update(tags::table.filter(tags::id.eq(tag_id)))
            .set(&db_updates)
            .get_result::<DbTag>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()> {
        use crate::schema::{article_tags, tags};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(article_tags::table.filter(article_tags::tag_id.eq(tag_id)))
                .execute(conn)?;

            let deleted = diesel::delete(tags::table.filter(tags::id.eq(tag_id))).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

/// Resolve every name in `names` to a tag row and attach it to the article.
///
/// Names are normalized again and blank ones skipped. Attaching a tag the
/// article already carries is a no-op. Must run inside the caller's
/// transaction so the article row and its associations commit together.
pub(super) fn attach_tags(
    conn: &mut SqliteConnection,
    article_id: i32,
    names: &[String],
) -> RepositoryResult<()> {
    use crate::schema::article_tags;

    for name in names {
        let name = normalize_tag_name(name);
        if name.is_empty() {
            continue;
        }

        let tag = find_or_create_tag(conn, &name)?;

        diesel::insert_into(article_tags::table)
            .values(&NewArticleTag::new(article_id, tag.id))
            .on_conflict_do_nothing()
            .execute(conn)?;
    }

    Ok(())
}

/// Get-or-create a tag by its normalized name.
///
/// The UNIQUE constraint on `tags.name` arbitrates concurrent creators: the
/// loser of the race gets a unique violation and reads the winner's row.
pub(super) fn find_or_create_tag(conn: &mut SqliteConnection, name: &str) -> RepositoryResult<DbTag> {
    use crate::schema::tags;

    let existing = tags::table
        .filter(tags::name.eq(name))
        .first::<DbTag>(conn)
        .optional()?;
    if let Some(tag) = existing {
        return Ok(tag);
    }

    let new_tag = DbNewTag {
        name,
        created_at: Utc::now().naive_utc(),
    };

    match diesel::insert_into(tags::table)
        .values(&new_tag)
        .get_result::<DbTag>(conn)
    {
        Ok(tag) => Ok(tag),
        // Article writes hold an IMMEDIATE transaction, so this only fires for
        // callers running on a connection without one.
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            log::debug!("tag `{name}` was created concurrently, reading it back");
            let tag = tags::table
                .filter(tags::name.eq(name))
                .first::<DbTag>(conn)?;
            Ok(tag)
        }
        Err(err) => Err(err.into()),
    }
}

/// `LIKE` pattern matching `term` anywhere, with `%`, `_` and `\` taken literally.
pub(super) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
