//! Demo data seeding command.
//!
//! Creates a demo user (`demo@example.com` / `kickflip-demo`) with a few
//! posts so a fresh instance has something to show. Safe to re-run: the
//! user insert is `ON CONFLICT DO NOTHING` and posts are only created when
//! the user was just inserted.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use super::{CommandError, connect};

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_USERNAME: &str = "demo";
const DEMO_PASSWORD: &str = "kickflip-demo";

/// Demo posts: (park name, prefecture, city, body).
const DEMO_POSTS: &[(&str, &str, &str, &str)] = &[
    (
        "新横浜スケートパーク",
        "神奈川県",
        "横浜市",
        "セクションが豊富で初心者から上級者まで楽しめます。朝イチは空いていておすすめ。",
    ),
    (
        "駒沢公園SS広場",
        "東京都",
        "世田谷区",
        "フラットが広くてクルージングに最適。週末は混み合うので平日の夕方が狙い目です。",
    ),
    (
        "塩浜第2公園",
        "千葉県",
        "市川市",
        "バンクとレールが新しくなっていました。路面もきれいでパークデビューにも良さそう。",
    ),
];

/// Seed the database with demo data.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(DEMO_PASSWORD.as_bytes(), &salt)
        .map_err(|e| CommandError::Hash(e.to_string()))?
        .to_string();

    let user_id: Option<(i32,)> = sqlx::query_as(
        r"
        INSERT INTO users (email, username, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        ",
    )
    .bind(DEMO_EMAIL)
    .bind(DEMO_USERNAME)
    .bind(&password_hash)
    .fetch_optional(&pool)
    .await?;

    let Some((user_id,)) = user_id else {
        tracing::info!("Demo user already exists, nothing to do");
        return Ok(());
    };

    for (name, prefecture, city, body) in DEMO_POSTS {
        let mut tx = pool.begin().await?;

        let (skatepark_id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO skateparks (name, prefecture, city)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(name)
        .bind(prefecture)
        .bind(city)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r"
            INSERT INTO posts (author_id, skatepark_id, body)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id)
        .bind(skatepark_id)
        .bind(body)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    tracing::info!(
        "Seeded demo user {DEMO_EMAIL} with {} posts",
        DEMO_POSTS.len()
    );
    Ok(())
}
