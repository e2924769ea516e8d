//! Post repository for database operations.
//!
//! Posts always carry their skatepark and their author's display name, so
//! every query joins `skateparks` and `users`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kickflip_core::{PostId, SkateparkId, UserId};

use super::{RepositoryError, like_pattern};
use crate::models::{Post, Skatepark};

/// Fields for a new skatepark, validated by the creation form.
#[derive(Debug, Clone)]
pub struct NewSkatepark {
    pub name: String,
    pub prefecture: String,
    pub city: String,
    pub image: Option<String>,
}

/// Database row for a post joined with its skatepark and author.
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i32,
    body: String,
    created_at: DateTime<Utc>,
    author_id: i32,
    author_name: String,
    skatepark_id: i32,
    skatepark_name: String,
    prefecture: String,
    city: String,
    image: Option<String>,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Self {
            id: PostId::new(r.id),
            author_id: UserId::new(r.author_id),
            author_name: r.author_name,
            skatepark: Skatepark {
                id: SkateparkId::new(r.skatepark_id),
                name: r.skatepark_name,
                prefecture: r.prefecture,
                city: r.city,
                image: r.image,
            },
            body: r.body,
            created_at: r.created_at,
        }
    }
}

/// Shared SELECT column list for post queries.
const POST_COLUMNS: &str = r"
    p.id, p.body, p.created_at,
    u.id AS author_id, u.username AS author_name,
    s.id AS skatepark_id, s.name AS skatepark_name, s.prefecture, s.city, s.image
";

/// Repository for post database operations.
pub struct PostRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List posts, newest first, optionally narrowed by prefecture substring.
    ///
    /// An absent or empty `region_query` returns all posts. A present query
    /// returns exactly the posts whose skatepark prefecture contains it as
    /// a substring, so `神奈川` also matches a stored `神奈川県`. An
    /// unmatched query returns an empty vec.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, region_query: Option<&str>) -> Result<Vec<Post>, RepositoryError> {
        let rows = match region_query.filter(|q| !q.is_empty()) {
            Some(query) => {
                sqlx::query_as::<_, PostRow>(&format!(
                    r"
                    SELECT {POST_COLUMNS}
                    FROM posts p
                    JOIN users u ON u.id = p.author_id
                    JOIN skateparks s ON s.id = p.skatepark_id
                    WHERE s.prefecture LIKE $1
                    ORDER BY p.created_at DESC, p.id DESC
                    "
                ))
                .bind(like_pattern(query))
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, PostRow>(&format!(
                    r"
                    SELECT {POST_COLUMNS}
                    FROM posts p
                    JOIN users u ON u.id = p.author_id
                    JOIN skateparks s ON s.id = p.skatepark_id
                    ORDER BY p.created_at DESC, p.id DESC
                    "
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// List the posts authored by one user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_author(&self, author: UserId) -> Result<Vec<Post>, RepositoryError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            JOIN skateparks s ON s.id = p.skatepark_id
            WHERE p.author_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            "
        ))
        .bind(author.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// Get a single post by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            JOIN skateparks s ON s.id = p.skatepark_id
            WHERE p.id = $1
            "
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    /// Create a skatepark and its post in one transaction.
    ///
    /// A partially created pair (skatepark saved but post not) is never
    /// observable: both rows commit together or not at all.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either insert fails.
    pub async fn create(
        &self,
        author: UserId,
        skatepark: &NewSkatepark,
        body: &str,
    ) -> Result<PostId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (skatepark_id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO skateparks (name, prefecture, city, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(&skatepark.name)
        .bind(&skatepark.prefecture)
        .bind(&skatepark.city)
        .bind(skatepark.image.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        let (post_id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO posts (author_id, skatepark_id, body)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(author.as_i32())
        .bind(skatepark_id)
        .bind(body)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(PostId::new(post_id))
    }

    /// Delete a post by ID; its comments cascade.
    ///
    /// Returns `true` if the post was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: PostId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
