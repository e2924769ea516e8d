//! Access policy guards.
//!
//! Two pure predicates over (requester identity, optional target), each
//! evaluated before the operation it protects. Denial is a routing
//! decision, not an error: the caller turns [`Access::Redirect`] into an
//! HTTP redirect.

use kickflip_core::PostId;

use crate::models::{CurrentUser, Post};

/// Outcome of a policy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// The operation may run.
    Allowed,
    /// The operation must not run; send the requester here instead.
    Redirect(String),
}

/// Passes iff the requester has no authenticated identity.
///
/// Logged-in users are sent back to the post listing (signup and login
/// pages are for guests).
#[must_use]
pub fn unauthenticated_only(current: Option<&CurrentUser>) -> Access {
    match current {
        None => Access::Allowed,
        Some(_) => Access::Redirect("/".to_string()),
    }
}

/// Passes iff the requester authored the post.
///
/// Anyone else is sent to the post's detail view.
#[must_use]
pub fn owner_only(current: &CurrentUser, post: &Post) -> Access {
    if current.id == post.author_id {
        Access::Allowed
    } else {
        Access::Redirect(detail_route(post.id))
    }
}

/// Route to a post's detail view.
#[must_use]
pub fn detail_route(id: PostId) -> String {
    format!("/posts/detail/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kickflip_core::{Email, SkateparkId, UserId};

    use crate::models::Skatepark;

    #[allow(clippy::unwrap_used)]
    fn user(id: i32) -> CurrentUser {
        CurrentUser {
            id: UserId::new(id),
            email: Email::parse("user@example.com").unwrap(),
            username: "user".to_string(),
        }
    }

    fn post(id: i32, author: i32) -> Post {
        Post {
            id: PostId::new(id),
            author_id: UserId::new(author),
            author_name: "author".to_string(),
            skatepark: Skatepark {
                id: SkateparkId::new(1),
                name: "Test skatepark".to_string(),
                prefecture: "神奈川県".to_string(),
                city: "横浜市".to_string(),
                image: None,
            },
            body: "body".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_unauthenticated_only_allows_guests() {
        assert_eq!(unauthenticated_only(None), Access::Allowed);
    }

    #[test]
    fn test_unauthenticated_only_redirects_logged_in_users_to_listing() {
        assert_eq!(
            unauthenticated_only(Some(&user(1))),
            Access::Redirect("/".to_string())
        );
    }

    #[test]
    fn test_owner_only_allows_the_author() {
        assert_eq!(owner_only(&user(1), &post(9, 1)), Access::Allowed);
    }

    #[test]
    fn test_owner_only_redirects_non_authors_to_detail() {
        assert_eq!(
            owner_only(&user(2), &post(9, 1)),
            Access::Redirect("/posts/detail/9".to_string())
        );
    }
}
