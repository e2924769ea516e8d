//! Account route handlers.
//!
//! Signup, login, logout and the profile page. Signup and login are
//! guest-only: a logged-in requester is sent back to the post listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use kickflip_core::UserId;

use crate::db::posts::PostRepository;
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::forms::{FormErrors, LoginForm, SignupForm};
use crate::middleware::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, Post, User};
use crate::policy::{self, Access};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error display on the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "accounts/signup.html")]
pub struct SignupTemplate {
    pub current_user: Option<CurrentUser>,
    pub form: SignupForm,
    pub errors: FormErrors,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "accounts/login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub error: Option<String>,
    pub email: String,
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "accounts/profile.html")]
pub struct ProfileTemplate {
    pub current_user: Option<CurrentUser>,
    pub user: User,
    pub posts: Vec<Post>,
}

// =============================================================================
// Signup
// =============================================================================

/// Display the signup page (guests only).
#[instrument(skip(current_user))]
pub async fn signup_page(OptionalAuth(current_user): OptionalAuth) -> Response {
    if let Access::Redirect(to) = policy::unauthenticated_only(current_user.as_ref()) {
        return Redirect::to(&to).into_response();
    }

    SignupTemplate {
        current_user: None,
        form: SignupForm::default(),
        errors: FormErrors::default(),
    }
    .into_response()
}

/// Handle the signup form.
///
/// On success the new user is logged in immediately and sent to the post
/// listing. Validation failures (including a duplicate email) re-render
/// the form with field errors.
#[instrument(skip(state, current_user, session, form))]
pub async fn signup(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    if let Access::Redirect(to) = policy::unauthenticated_only(current_user.as_ref()) {
        return Ok(Redirect::to(&to).into_response());
    }

    let mut errors = form.validate();
    if errors.is_empty() {
        match AuthService::new(state.pool())
            .signup(form.email.trim(), form.username.trim(), &form.password)
            .await
        {
            Ok(user) => {
                let current = CurrentUser {
                    id: user.id,
                    email: user.email,
                    username: user.username,
                };
                set_current_user(&session, &current).await?;
                return Ok(Redirect::to("/").into_response());
            }
            Err(AuthError::UserAlreadyExists) => {
                errors.add("email", "is already registered".to_string());
            }
            Err(AuthError::InvalidEmail(e)) => {
                errors.add("email", e.to_string());
            }
            Err(AuthError::WeakPassword(msg)) => {
                errors.add("password", msg);
            }
            Err(other) => return Err(AppError::Auth(other)),
        }
    }

    Ok(SignupTemplate {
        current_user: None,
        form: SignupForm {
            password: String::new(),
            ..form
        },
        errors,
    }
    .into_response())
}

// =============================================================================
// Login / Logout
// =============================================================================

/// Display the login page (guests only).
#[instrument(skip(current_user))]
pub async fn login_page(
    OptionalAuth(current_user): OptionalAuth,
    Query(query): Query<LoginQuery>,
) -> Response {
    if let Access::Redirect(to) = policy::unauthenticated_only(current_user.as_ref()) {
        return Redirect::to(&to).into_response();
    }

    LoginTemplate {
        current_user: None,
        error: query.error,
        email: query.email.unwrap_or_default(),
    }
    .into_response()
}

/// Handle the login form.
///
/// Wrong credentials send the requester back to the login page with an
/// error flag and the attempted email prefilled.
#[instrument(skip(state, current_user, session, form))]
pub async fn login(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if let Access::Redirect(to) = policy::unauthenticated_only(current_user.as_ref()) {
        return Ok(Redirect::to(&to).into_response());
    }

    match AuthService::new(state.pool())
        .login(form.email.trim(), &form.password)
        .await
    {
        Ok(user) => {
            let current = CurrentUser {
                id: user.id,
                email: user.email,
                username: user.username,
            };
            set_current_user(&session, &current).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("login failed");
            let to = format!(
                "/accounts/login?error=credentials&email={}",
                urlencoding::encode(form.email.trim())
            );
            Ok(Redirect::to(&to).into_response())
        }
        Err(other) => Err(AppError::Auth(other)),
    }
}

/// Log out and return to the login page.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    clear_current_user(&session).await?;
    Ok(Redirect::to("/accounts/login").into_response())
}

// =============================================================================
// Profile
// =============================================================================

/// Display a user's profile with their posts.
#[instrument(skip(state, current_user))]
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<ProfileTemplate> {
    let user_id = UserId::new(id);

    let user = UserRepository::new(state.pool())
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    let posts = PostRepository::new(state.pool())
        .list_by_author(user_id)
        .await?;

    Ok(ProfileTemplate {
        current_user: Some(current_user),
        user,
        posts,
    })
}
