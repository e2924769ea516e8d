//! Post, comment and filter flows against a real database.
//!
//! All tests are `#[ignore]`d; see the crate docs for how to run them.
//! They share a database, so assertions only look at rows the test itself
//! created.

#![allow(clippy::unwrap_used)]

use kickflip_integration_tests::{create_test_user, test_pool, unique};
use kickflip_web::db::RepositoryError;
use kickflip_web::db::comments::CommentRepository;
use kickflip_web::db::posts::{NewSkatepark, PostRepository};

fn skatepark(prefecture: &str) -> NewSkatepark {
    NewSkatepark {
        name: unique("park"),
        prefecture: prefecture.to_string(),
        city: "横浜市".to_string(),
        image: None,
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set KICKFLIP_TEST_DATABASE_URL)"]
async fn create_then_list_includes_the_post_exactly_once() {
    let pool = test_pool().await;
    let author = create_test_user(&pool).await;
    let posts = PostRepository::new(&pool);

    let id = posts
        .create(author, &skatepark("神奈川県"), "This is test1")
        .await
        .unwrap();

    let listed = posts.list(None).await.unwrap();
    assert_eq!(listed.iter().filter(|p| p.id == id).count(), 1);

    // An empty query means no filter
    let listed = posts.list(Some("")).await.unwrap();
    assert_eq!(listed.iter().filter(|p| p.id == id).count(), 1);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set KICKFLIP_TEST_DATABASE_URL)"]
async fn filter_matches_prefecture_by_substring() {
    let pool = test_pool().await;
    let author = create_test_user(&pool).await;
    let posts = PostRepository::new(&pool);

    let kanagawa = posts
        .create(author, &skatepark("神奈川県"), "This is test1")
        .await
        .unwrap();
    let tokyo = posts
        .create(author, &skatepark("東京都"), "This is test2")
        .await
        .unwrap();

    // The stored value is 神奈川県; the shorter 神奈川 must still match
    let filtered = posts.list(Some("神奈川")).await.unwrap();
    assert!(filtered.iter().any(|p| p.id == kanagawa));
    assert!(filtered.iter().all(|p| p.id != tokyo));
    for post in &filtered {
        assert!(post.skatepark.prefecture.contains("神奈川"));
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set KICKFLIP_TEST_DATABASE_URL)"]
async fn filter_with_unmatched_query_returns_empty() {
    let pool = test_pool().await;
    let author = create_test_user(&pool).await;
    let posts = PostRepository::new(&pool);

    posts
        .create(author, &skatepark("神奈川県"), "This is test1")
        .await
        .unwrap();

    // Longer than the 4-character prefecture column, so it cannot match
    let filtered = posts.list(Some("存在しない県")).await.unwrap();
    assert!(filtered.is_empty());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set KICKFLIP_TEST_DATABASE_URL)"]
async fn comment_appends_exactly_one_row() {
    let pool = test_pool().await;
    let author = create_test_user(&pool).await;
    let posts = PostRepository::new(&pool);
    let comments = CommentRepository::new(&pool);

    let post_id = posts
        .create(author, &skatepark("神奈川県"), "This is test1")
        .await
        .unwrap();

    assert_eq!(comments.count_for_post(post_id).await.unwrap(), 0);

    comments.create(post_id, author, "nice park").await.unwrap();

    assert_eq!(comments.count_for_post(post_id).await.unwrap(), 1);
    let listed = comments.list_for_post(post_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().unwrap().body, "nice park");
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set KICKFLIP_TEST_DATABASE_URL)"]
async fn comments_are_insertion_ordered() {
    let pool = test_pool().await;
    let author = create_test_user(&pool).await;
    let posts = PostRepository::new(&pool);
    let comments = CommentRepository::new(&pool);

    let post_id = posts
        .create(author, &skatepark("神奈川県"), "This is test1")
        .await
        .unwrap();

    comments.create(post_id, author, "first").await.unwrap();
    comments.create(post_id, author, "second").await.unwrap();
    comments.create(post_id, author, "third").await.unwrap();

    let bodies: Vec<_> = comments
        .list_for_post(post_id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.body)
        .collect();
    assert_eq!(bodies, ["first", "second", "third"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set KICKFLIP_TEST_DATABASE_URL)"]
async fn comment_on_deleted_post_is_not_found() {
    let pool = test_pool().await;
    let author = create_test_user(&pool).await;
    let posts = PostRepository::new(&pool);
    let comments = CommentRepository::new(&pool);

    let post_id = posts
        .create(author, &skatepark("神奈川県"), "This is test1")
        .await
        .unwrap();
    assert!(posts.delete(post_id).await.unwrap());

    let result = comments.create(post_id, author, "too late").await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set KICKFLIP_TEST_DATABASE_URL)"]
async fn delete_removes_the_post_and_cascades_comments() {
    let pool = test_pool().await;
    let author = create_test_user(&pool).await;
    let posts = PostRepository::new(&pool);
    let comments = CommentRepository::new(&pool);

    let post_id = posts
        .create(author, &skatepark("神奈川県"), "This is test1")
        .await
        .unwrap();
    comments.create(post_id, author, "soon gone").await.unwrap();

    assert!(posts.delete(post_id).await.unwrap());

    assert!(posts.get(post_id).await.unwrap().is_none());
    assert_eq!(comments.count_for_post(post_id).await.unwrap(), 0);

    // A second delete finds nothing
    assert!(!posts.delete(post_id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set KICKFLIP_TEST_DATABASE_URL)"]
async fn schema_rejects_over_long_fields() {
    let pool = test_pool().await;
    let author = create_test_user(&pool).await;
    let posts = PostRepository::new(&pool);

    // 51-character park name is over the varchar(50) bound
    let mut park = skatepark("神奈川県");
    park.name = "t".repeat(51);
    assert!(posts.create(author, &park, "body").await.is_err());

    // 301-character body is over the varchar(300) bound
    let result = posts
        .create(author, &skatepark("神奈川県"), &"a".repeat(301))
        .await;
    assert!(result.is_err());

    // The boundary values are accepted
    let mut park = skatepark("神奈川県");
    park.name = "t".repeat(50);
    assert!(posts.create(author, &park, &"a".repeat(300)).await.is_ok());
}
