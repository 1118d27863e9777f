use blog_api::forms::UpdateMode;
use blog_api::forms::articles::{ArticleForm, TagInput};
use blog_api::forms::comments::CommentForm;
use blog_api::forms::tags::TagForm;
use blog_api::services::ServiceError;
use blog_api::services::articles::{
    ArticleQuery, create_article, load_article, load_articles, modify_article, remove_article,
};
use blog_api::services::comments::{CommentQuery, create_comment, load_comments};
use blog_api::services::tags::{
    TagArticlesQuery, TagQuery, create_tag, load_tag_articles, load_tags,
};

mod common;

fn article_form(title: &str, tags: &[&str]) -> ArticleForm {
    ArticleForm {
        title: Some(title.to_string()),
        content: Some("Plenty of content for the body".to_string()),
        tags: Some(tags.iter().map(|name| TagInput::new(*name)).collect()),
        is_published: None,
    }
}

fn comment_form(content: &str, author: Option<&str>) -> CommentForm {
    CommentForm {
        content: Some(content.to_string()),
        author_name: author.map(str::to_string),
    }
}

#[test]
fn test_title_minimum_length() {
    let test_db = common::TestDb::new("test_title_minimum_length.db");
    let repo = test_db.repo();

    let err = create_article(&repo, article_form("Hi", &[])).expect_err("too short");
    match err {
        ServiceError::Validation(errors) => assert!(errors.has_field("title")),
        other => panic!("unexpected error: {other:?}"),
    }

    let created = create_article(&repo, article_form("Hi!", &[])).expect("three characters");
    assert_eq!(created.title, "Hi!");
    assert!(created.is_recent);
}

#[test]
fn test_duplicate_tags_are_rejected_before_writing() {
    let test_db = common::TestDb::new("test_duplicate_tags_rejected.db");
    let repo = test_db.repo();

    let err = create_article(&repo, article_form("Hello", &["Go", "go "])).expect_err("duplicate");
    match err {
        ServiceError::Validation(errors) => {
            assert_eq!(
                errors.messages("tags"),
                ["Duplicate tag names are not allowed.".to_string()]
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let page = load_articles(&repo, ArticleQuery::default()).unwrap();
    assert_eq!(page.count, 0);
    assert!(load_tags(&repo, TagQuery::default()).unwrap().is_empty());
}

#[test]
fn test_tags_are_shared_between_articles() {
    let test_db = common::TestDb::new("test_tags_are_shared.db");
    let repo = test_db.repo();

    let first = create_article(&repo, article_form("First", &["Rust", ""])).unwrap();
    let second = create_article(&repo, article_form("Second", &["  rust "])).unwrap();

    assert_eq!(first.tags.len(), 1);
    assert_eq!(first.tags[0].id, second.tags[0].id);

    let tags = load_tags(&repo, TagQuery::default()).unwrap();
    assert_eq!(tags.len(), 1);

    let articles = load_tag_articles(&repo, tags[0].id, TagArticlesQuery::default()).unwrap();
    let titles: Vec<&str> = articles.iter().map(|article| article.title.as_str()).collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[test]
fn test_tag_name_uniqueness_is_a_field_error() {
    let test_db = common::TestDb::new("test_tag_name_uniqueness.db");
    let repo = test_db.repo();

    create_tag(&repo, TagForm::new("Rust")).unwrap();
    let err = create_tag(&repo, TagForm::new(" rust ")).expect_err("duplicate tag");

    match err {
        ServiceError::Validation(errors) => {
            assert_eq!(
                errors.messages("name"),
                ["tag with this name already exists.".to_string()]
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_tag_presence_on_update() {
    let test_db = common::TestDb::new("test_tag_presence_on_update.db");
    let repo = test_db.repo();

    let created = create_article(&repo, article_form("Tagged", &["rust", "web"])).unwrap();

    let patch = ArticleForm {
        content: Some("Completely rewritten body".to_string()),
        ..ArticleForm::default()
    };
    let kept = modify_article(&repo, created.id, patch, UpdateMode::Partial).unwrap();
    assert_eq!(kept.tags.len(), 2);
    assert_eq!(kept.title, "Tagged");

    let patch = ArticleForm {
        tags: Some(Vec::new()),
        ..ArticleForm::default()
    };
    let cleared = modify_article(&repo, created.id, patch, UpdateMode::Partial).unwrap();
    assert!(cleared.tags.is_empty());
}

#[test]
fn test_rejected_update_leaves_article_untouched() {
    let test_db = common::TestDb::new("test_rejected_update_untouched.db");
    let repo = test_db.repo();

    let created = create_article(&repo, article_form("Stable", &["rust", "web"])).unwrap();

    for tags in [&["rust", "x"][..], &["Go", "go "][..]] {
        let patch = ArticleForm {
            title: Some("Renamed title".to_string()),
            tags: Some(tags.iter().map(|name| TagInput::new(*name)).collect()),
            ..ArticleForm::default()
        };

        let err = modify_article(&repo, created.id, patch, UpdateMode::Partial)
            .expect_err("invalid tags");
        match err {
            ServiceError::Validation(errors) => assert!(errors.has_field("tags")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    let detail = load_article(&repo, created.id).unwrap();
    assert_eq!(detail.title, "Stable");
    assert_eq!(detail.updated_at, created.updated_at);
    let names: Vec<&str> = detail.tags.iter().map(|tag| tag.name.as_str()).collect();
    assert_eq!(names, vec!["rust", "web"]);

    let tags = load_tags(&repo, TagQuery::default()).unwrap();
    assert_eq!(tags.len(), 2);
}

#[test]
fn test_full_update_requires_title_and_content() {
    let test_db = common::TestDb::new("test_full_update_requires.db");
    let repo = test_db.repo();

    let created = create_article(&repo, article_form("Original", &[])).unwrap();
    let form = ArticleForm {
        title: Some("Replacement".to_string()),
        ..ArticleForm::default()
    };

    let err = modify_article(&repo, created.id, form, UpdateMode::Full).expect_err("no content");
    match err {
        ServiceError::Validation(errors) => assert!(errors.has_field("content")),
        other => panic!("unexpected error: {other:?}"),
    }

    let detail = load_article(&repo, created.id).unwrap();
    assert_eq!(detail.title, "Original");
}

#[test]
fn test_comment_rules() {
    let test_db = common::TestDb::new("test_comment_rules.db");
    let repo = test_db.repo();

    let created = create_article(&repo, article_form("Commented", &[])).unwrap();

    let err = create_comment(&repo, created.id, comment_form("Nice", None)).expect_err("short");
    assert!(matches!(err, ServiceError::Validation(_)));

    let comment = create_comment(&repo, created.id, comment_form("Nice!", Some("   "))).unwrap();
    assert_eq!(comment.author_name, "Anonymous");
    assert!(comment.is_approved);

    let detail = load_article(&repo, created.id).unwrap();
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].id, comment.id);
}

#[test]
fn test_unpublished_articles_are_hidden() {
    let test_db = common::TestDb::new("test_unpublished_hidden.db");
    let repo = test_db.repo();

    create_article(&repo, article_form("Visible", &[])).unwrap();
    let mut draft = article_form("Draft", &[]);
    draft.is_published = Some(false);
    let draft = create_article(&repo, draft).unwrap();
    assert!(!draft.is_published);

    let page = load_articles(&repo, ArticleQuery::default()).unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].title, "Visible");

    assert!(matches!(
        load_article(&repo, draft.id),
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        load_comments(&repo, draft.id, CommentQuery::default()),
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        create_comment(&repo, draft.id, comment_form("Sneaky comment", None)),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn test_remove_article_then_not_found() {
    let test_db = common::TestDb::new("test_remove_article.db");
    let repo = test_db.repo();

    let created = create_article(&repo, article_form("Short lived", &["rust"])).unwrap();
    create_comment(&repo, created.id, comment_form("First!", None)).unwrap();

    remove_article(&repo, created.id).unwrap();

    assert!(matches!(
        load_article(&repo, created.id),
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        remove_article(&repo, created.id),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn test_out_of_range_page() {
    let test_db = common::TestDb::new("test_out_of_range_page.db");
    let repo = test_db.repo();

    let empty = load_articles(&repo, ArticleQuery::default()).unwrap();
    assert_eq!(empty.count, 0);
    assert_eq!(empty.total_pages, 0);

    let query = ArticleQuery {
        page: Some(2),
        ..ArticleQuery::default()
    };
    assert!(matches!(
        load_articles(&repo, query),
        Err(ServiceError::NotFound)
    ));

    for index in 0..3 {
        create_article(&repo, article_form(&format!("Article {index}"), &[])).unwrap();
    }
    let query = ArticleQuery {
        page: Some(2),
        page_size: Some(2),
        ..ArticleQuery::default()
    };
    let page = load_articles(&repo, query).unwrap();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.total_pages, 2);

    let query = ArticleQuery {
        page: Some(usize::MAX),
        ..ArticleQuery::default()
    };
    assert!(matches!(
        load_articles(&repo, query),
        Err(ServiceError::NotFound)
    ));
}
