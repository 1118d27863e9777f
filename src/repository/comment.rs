use diesel::prelude::*;

use crate::domain::comment::{
    Comment as DomainComment, CommentListQuery, CommentSort, NewComment as DomainNewComment,
    UpdateComment as DomainUpdateComment,
};
use crate::domain::ordering::SortDirection;
use crate::models::comment::{
    Comment as DbComment, NewComment as DbNewComment, UpdateComment as DbUpdateComment,
};
use crate::repository::{
    CommentReader, CommentWriter, DieselRepository, RepositoryError, RepositoryResult,
};

impl CommentReader for DieselRepository {
    fn get_comment_by_id(
        &self,
        article_id: i32,
        comment_id: i32,
    ) -> RepositoryResult<Option<DomainComment>> {
        use crate::schema::comments;

        let mut conn = self.conn()?;
        let comment = comments::table
            .filter(comments::id.eq(comment_id))
            .filter(comments::article_id.eq(article_id))
            .first::<DbComment>(&mut conn)
            .optional()?;

        Ok(comment.map(DomainComment::from))
    }

    fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<Vec<DomainComment>> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let mut items = comments::table
            .filter(comments::article_id.eq(query.article_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if query.approved_only {
            items = items.filter(comments::is_approved.eq(true));
        }

        items = match (query.ordering.field, query.ordering.direction) {
            (CommentSort::CreatedAt, SortDirection::Asc) => {
                items.order((comments::created_at.asc(), comments::id.asc()))
            }
            (CommentSort::CreatedAt, SortDirection::Desc) => {
                items.order((comments::created_at.desc(), comments::id.desc()))
            }
        };

        let db_comments = items.load::<DbComment>(&mut conn)?;

        Ok(db_comments.into_iter().map(DomainComment::from).collect())
    }
}

impl CommentWriter for DieselRepository {
    fn create_comment(&self, new_comment: &DomainNewComment) -> RepositoryResult<DomainComment> {
        use crate::schema::comments;

        let mut conn = self.conn()?;
        let insertable = DbNewComment::from(new_comment);

        let created = diesel::insert_into(comments::table)
            .values(&insertable)
            .get_result::<DbComment>(&mut conn)?;

        Ok(created.into())
    }

    fn update_comment(
        &self,
        article_id: i32,
        comment_id: i32,
        updates: &DomainUpdateComment,
    ) -> RepositoryResult<DomainComment> {
        use crate::schema::comments;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateComment::from(updates);

        let target = comments::table
            .filter(comments::id.eq(comment_id))
            .filter(comments::article_id.eq(article_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbComment>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_comment(&self, article_id: i32, comment_id: i32) -> RepositoryResult<()> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let target = comments::table
            .filter(comments::id.eq(comment_id))
            .filter(comments::article_id.eq(article_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
