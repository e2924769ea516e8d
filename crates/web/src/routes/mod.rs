//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Post listing (optional ?query= prefecture filter)
//! GET  /health                  - Health check
//!
//! # Posts
//! GET  /posts/create            - Post creation form (requires auth)
//! POST /posts/create            - Create skatepark + post
//! GET  /posts/detail/{id}       - Post detail with comments and weather (requires auth)
//! POST /posts/detail/{id}       - Submit a comment
//! GET  /posts/delete/{id}       - Delete confirmation page (author only)
//! POST /posts/delete/{id}       - Delete the post
//!
//! # Accounts
//! GET  /accounts/signup         - Signup page (guests only)
//! POST /accounts/signup         - Create account and log in
//! GET  /accounts/login          - Login page (guests only)
//! POST /accounts/login          - Login action
//! GET  /accounts/logout         - Logout action
//! GET  /accounts/profile/{id}   - User profile with their posts (requires auth)
//! ```

pub mod accounts;
pub mod posts;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the post routes router.
pub fn posts_routes() -> Router<AppState> {
    Router::new()
        .route("/create", get(posts::create_page).post(posts::create))
        .route(
            "/detail/{id}",
            get(posts::detail).post(posts::submit_comment),
        )
        .route(
            "/delete/{id}",
            get(posts::delete_page).post(posts::delete),
        )
}

/// Create the account routes router.
pub fn accounts_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/signup",
            get(accounts::signup_page).post(accounts::signup),
        )
        .route("/login", get(accounts::login_page).post(accounts::login))
        .route("/logout", get(accounts::logout))
        .route("/profile/{id}", get(accounts::profile))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Post listing is the front page
        .route("/", get(posts::list))
        // Post routes
        .nest("/posts", posts_routes())
        // Account routes
        .nest("/accounts", accounts_routes())
}
