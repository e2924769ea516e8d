//! Integration tests for Kickflip.
//!
//! These tests exercise the repositories against a real `PostgreSQL`
//! instance and are `#[ignore]`d so `cargo test` stays green without one.
//!
//! # Running
//!
//! ```bash
//! # Start a database and point the tests at it
//! export KICKFLIP_TEST_DATABASE_URL=postgres://localhost/kickflip_test
//!
//! # Run the ignored tests
//! cargo test -p kickflip-integration-tests -- --ignored
//! ```
//!
//! Each connection runs the migrations first, so a fresh, empty database
//! works. Tests create their own uniquely named users and operate only on
//! rows they created, so they can share a database and be re-run.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use sqlx::PgPool;

use kickflip_core::{Email, UserId};
use kickflip_web::db::users::UserRepository;

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Connect to the test database and apply migrations.
///
/// # Panics
///
/// Panics if the database URL is unset or the database is unreachable;
/// callers are `#[ignore]`d tests that opted in to needing one.
#[allow(clippy::unwrap_used)]
pub async fn test_pool() -> PgPool {
    let url = std::env::var("KICKFLIP_TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("set KICKFLIP_TEST_DATABASE_URL to run integration tests");

    let pool = PgPool::connect(&url).await.expect("database unreachable");

    sqlx::migrate!("../web/migrations")
        .run(&pool)
        .await
        .expect("migrations failed");

    pool
}

/// A process-unique suffix for test data that must not collide across
/// runs sharing a database.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{}-{nanos}-{n}", std::process::id())
}

/// Create a user to own test posts and comments.
///
/// # Panics
///
/// Panics if the insert fails.
#[allow(clippy::unwrap_used)]
pub async fn create_test_user(pool: &PgPool) -> UserId {
    let email = Email::parse(&format!("{}@test.example", unique("user"))).unwrap();

    // The hash is never verified by these tests; any argon2-shaped
    // string keeps the column honest.
    let user = UserRepository::new(pool)
        .create(&email, "testuser", "$argon2id$v=19$m=19456,t=2,p=1$dGVzdHNhbHQ$dGVzdGhhc2g")
        .await
        .expect("failed to create test user");

    user.id
}
