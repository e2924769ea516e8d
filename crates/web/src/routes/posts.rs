//! Post route handlers.
//!
//! Listing with a prefecture substring filter, detail composition with the
//! best-effort weather lookup, creation of a skatepark + post pair, comment
//! submission and author-only deletion.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use kickflip_core::{PostId, regions};

use crate::db::comments::CommentRepository;
use crate::db::posts::{NewSkatepark, PostRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::forms::{CommentForm, FormErrors, PostForm, SkateparkForm};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{Comment, CurrentUser, Post};
use crate::policy::{self, Access};
use crate::state::AppState;

// =============================================================================
// Query and Form Types
// =============================================================================

/// Query parameters for the post listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Prefecture filter; matched as a substring so `神奈川` also finds
    /// parks stored as `神奈川県`.
    pub query: Option<String>,
}

/// Combined form data for the creation page (both entities in one submit).
#[derive(Debug, Deserialize)]
pub struct CreatePostForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prefecture: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub body: String,
}

impl CreatePostForm {
    fn split(self) -> (SkateparkForm, PostForm) {
        (
            SkateparkForm {
                name: self.name,
                prefecture: self.prefecture,
                city: self.city,
                image: self.image,
            },
            PostForm { body: self.body },
        )
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Post listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "posts/list.html")]
pub struct PostsListTemplate {
    pub current_user: Option<CurrentUser>,
    pub posts: Vec<Post>,
    pub prefectures: &'static [(&'static str, &'static str)],
    pub query: String,
}

/// Post detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "posts/detail.html")]
pub struct PostDetailTemplate {
    pub current_user: Option<CurrentUser>,
    pub post: Post,
    pub comments: Vec<Comment>,
    pub comment_form: CommentForm,
    pub comment_errors: FormErrors,
    pub prefectures: &'static [(&'static str, &'static str)],
    pub current_weather: String,
}

/// Post creation page template.
#[derive(Template, WebTemplate)]
#[template(path = "posts/create.html")]
pub struct PostCreateTemplate {
    pub current_user: Option<CurrentUser>,
    pub skatepark_form: SkateparkForm,
    pub post_form: PostForm,
    pub errors: FormErrors,
    pub prefectures: &'static [(&'static str, &'static str)],
}

/// Delete confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "posts/delete.html")]
pub struct PostDeleteTemplate {
    pub current_user: Option<CurrentUser>,
    pub post: Post,
}

// =============================================================================
// Listing
// =============================================================================

/// Display the post listing, optionally narrowed by prefecture substring.
///
/// The full prefecture list is always handed to the template for the
/// filter control, regardless of the query.
#[instrument(skip(state, current_user))]
pub async fn list(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Query(params): Query<ListQuery>,
) -> Result<PostsListTemplate> {
    let posts = PostRepository::new(state.pool())
        .list(params.query.as_deref())
        .await?;

    Ok(PostsListTemplate {
        current_user,
        posts,
        prefectures: regions::all(),
        query: params.query.unwrap_or_default(),
    })
}

// =============================================================================
// Detail and Comments
// =============================================================================

/// Assemble the detail view-model for a post.
///
/// Shared by the GET handler and the invalid-comment re-render: loads the
/// post and its comments, resolves the prefecture to a weather city code
/// (a stored prefecture missing from the directory is data corruption) and
/// fetches the weather, degrading to the placeholder on failure.
async fn compose_detail(
    state: &AppState,
    id: PostId,
    current_user: CurrentUser,
    comment_form: CommentForm,
    comment_errors: FormErrors,
) -> Result<PostDetailTemplate> {
    let post = PostRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    let comments = CommentRepository::new(state.pool())
        .list_for_post(id)
        .await?;

    let city_code = regions::code_for(&post.skatepark.prefecture)
        .map_err(|e| AppError::UnknownRegion(e.0))?;

    let current_weather = state.weather().current_weather(city_code).await;

    Ok(PostDetailTemplate {
        current_user: Some(current_user),
        post,
        comments,
        comment_form,
        comment_errors,
        prefectures: regions::all(),
        current_weather,
    })
}

/// Display a post with its comments, an empty comment form and the
/// current weather at its skatepark.
#[instrument(skip(state, user))]
pub async fn detail(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<PostDetailTemplate> {
    compose_detail(
        &state,
        PostId::new(id),
        user,
        CommentForm::default(),
        FormErrors::default(),
    )
    .await
}

/// Handle a comment submission on the detail page.
///
/// An invalid body re-renders the same detail page with field errors and
/// writes nothing; a valid one appends exactly one comment and redirects
/// back to the detail view.
#[instrument(skip(state, user, form))]
pub async fn submit_comment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
    Form(form): Form<CommentForm>,
) -> Result<Response> {
    let post_id = PostId::new(id);

    let errors = form.validate();
    if !errors.is_empty() {
        let page = compose_detail(&state, post_id, user, form, errors).await?;
        return Ok(page.into_response());
    }

    CommentRepository::new(state.pool())
        .create(post_id, user.id, form.body.trim())
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::NotFound(format!("post {post_id}")),
            other => AppError::Database(other),
        })?;

    Ok(Redirect::to(&policy::detail_route(post_id)).into_response())
}

// =============================================================================
// Creation
// =============================================================================

/// Display the post creation page with both empty forms.
#[instrument(skip(user))]
pub async fn create_page(RequireAuth(user): RequireAuth) -> PostCreateTemplate {
    PostCreateTemplate {
        current_user: Some(user),
        skatepark_form: SkateparkForm::default(),
        post_form: PostForm::default(),
        errors: FormErrors::default(),
        prefectures: regions::all(),
    }
}

/// Handle the creation form.
///
/// Both the skatepark and the post fields must validate; on any failure
/// nothing is created and the page re-renders with both error sets. On
/// success the skatepark and post are inserted in one transaction and the
/// requester is sent back to the listing.
#[instrument(skip(state, user, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<CreatePostForm>,
) -> Result<Response> {
    let (skatepark_form, post_form) = form.split();

    let mut errors = skatepark_form.validate();
    errors.merge(post_form.validate());

    if !errors.is_empty() {
        let page = PostCreateTemplate {
            current_user: Some(user),
            skatepark_form,
            post_form,
            errors,
            prefectures: regions::all(),
        };
        return Ok(page.into_response());
    }

    let skatepark = NewSkatepark {
        name: skatepark_form.name.trim().to_string(),
        prefecture: skatepark_form.prefecture.clone(),
        city: skatepark_form.city.trim().to_string(),
        image: skatepark_form.image(),
    };

    let post_id = PostRepository::new(state.pool())
        .create(user.id, &skatepark, post_form.body.trim())
        .await?;

    tracing::info!(%post_id, author = %user.id, "post created");

    Ok(Redirect::to("/").into_response())
}

// =============================================================================
// Deletion
// =============================================================================

/// Display the delete confirmation page.
///
/// Only the author gets this far; anyone else is sent to the post's
/// detail view.
#[instrument(skip(state, user))]
pub async fn delete_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Response> {
    let post = PostRepository::new(state.pool())
        .get(PostId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    if let Access::Redirect(to) = policy::owner_only(&user, &post) {
        return Ok(Redirect::to(&to).into_response());
    }

    Ok(PostDeleteTemplate {
        current_user: Some(user),
        post,
    }
    .into_response())
}

/// Delete a post; its comments cascade away with it.
#[instrument(skip(state, user))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Response> {
    let repo = PostRepository::new(state.pool());

    let post = repo
        .get(PostId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    if let Access::Redirect(to) = policy::owner_only(&user, &post) {
        return Ok(Redirect::to(&to).into_response());
    }

    repo.delete(post.id).await?;
    tracing::info!(post_id = %post.id, author = %user.id, "post deleted");

    Ok(Redirect::to("/").into_response())
}
