//! Database operations for the Kickflip `PostgreSQL` database.
//!
//! One repository per entity type, each a thin struct over a borrowed
//! [`PgPool`]:
//!
//! - [`users::UserRepository`] - accounts and password hashes
//! - [`posts::PostRepository`] - posts with their skateparks
//! - [`comments::CommentRepository`] - per-post comments
//!
//! Queries use the sqlx runtime API with [`sqlx::FromRow`] row structs, so
//! the crate builds without a live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p kickflip-cli -- migrate
//! ```

pub mod comments;
pub mod posts;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Escape LIKE metacharacters in a user-supplied fragment.
///
/// The region filter matches by substring; `%`, `_` and the escape
/// character itself must not act as wildcards when they appear in the
/// query string.
#[must_use]
pub fn like_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_plain() {
        assert_eq!(like_pattern("神奈川"), "%神奈川%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("10%_"), "%10\\%\\_%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_like_pattern_empty_matches_everything() {
        assert_eq!(like_pattern(""), "%%");
    }
}
