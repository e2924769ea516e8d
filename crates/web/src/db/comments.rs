//! Comment repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kickflip_core::{CommentId, PostId, UserId};

use super::RepositoryError;
use crate::models::Comment;

/// Database row for a comment joined with its author.
#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i32,
    post_id: i32,
    author_id: i32,
    author_name: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(r: CommentRow) -> Self {
        Self {
            id: CommentId::new(r.id),
            post_id: PostId::new(r.post_id),
            author_id: UserId::new(r.author_id),
            author_name: r.author_name,
            body: r.body,
            created_at: r.created_at,
        }
    }
}

/// Repository for comment database operations.
pub struct CommentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a post's comments in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, RepositoryError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r"
            SELECT c.id, c.post_id, c.author_id, u.username AS author_name,
                   c.body, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            ",
        )
        .bind(post.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    /// Append a comment to a post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post no longer exists
    /// (the insert races a delete and hits the foreign key).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        post: PostId,
        author: UserId,
        body: &str,
    ) -> Result<CommentId, RepositoryError> {
        let row: (i32,) = sqlx::query_as(
            r"
            INSERT INTO comments (post_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(post.as_i32())
        .bind(author.as_i32())
        .bind(body)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(CommentId::new(row.0))
    }

    /// Count a post's comments.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_post(&self, post: PostId) -> Result<i64, RepositoryError> {
        let row: (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*)
            FROM comments
            WHERE post_id = $1
            ",
        )
        .bind(post.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(row.0)
    }
}
