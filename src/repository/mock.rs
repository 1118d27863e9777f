use mockall::mock;

use super::{
    ArticleReader, ArticleWriter, CommentReader, CommentWriter, RepositoryResult, TagReader,
    TagWriter,
};
use crate::domain::{
    article::{Article, ArticleListQuery, NewArticle, UpdateArticle},
    comment::{Comment, CommentListQuery, NewComment, UpdateComment},
    tag::{NewTag, Tag, TagListQuery, UpdateTag},
};

mock! {
    pub BlogRepository {}

    impl TagReader for BlogRepository {
        fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
        fn list_tags(&self, query: TagListQuery) -> RepositoryResult<Vec<Tag>>;
    }

    impl TagWriter for BlogRepository {
        fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
        fn update_tag(&self, tag_id: i32, updates: &UpdateTag) -> RepositoryResult<Tag>;
        fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()>;
    }

    impl ArticleReader for BlogRepository {
        fn get_article_by_id(&self, id: i32) -> RepositoryResult<Option<Article>>;
        fn list_articles(&self, query: ArticleListQuery) -> RepositoryResult<(usize, Vec<Article>)>;
    }

    impl ArticleWriter for BlogRepository {
        fn create_article(&self, new_article: &NewArticle) -> RepositoryResult<Article>;
        fn update_article(&self, article_id: i32, updates: &UpdateArticle) -> RepositoryResult<Article>;
        fn delete_article(&self, article_id: i32) -> RepositoryResult<()>;
    }

    impl CommentReader for BlogRepository {
        fn get_comment_by_id(&self, article_id: i32, comment_id: i32) -> RepositoryResult<Option<Comment>>;
        fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<Vec<Comment>>;
    }

    impl CommentWriter for BlogRepository {
        fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment>;
        fn update_comment(&self, article_id: i32, comment_id: i32, updates: &UpdateComment) -> RepositoryResult<Comment>;
        fn delete_comment(&self, article_id: i32, comment_id: i32) -> RepositoryResult<()>;
    }
}
