//! Post, skatepark and comment domain types.

use chrono::{DateTime, Utc};

use kickflip_core::{CommentId, PostId, SkateparkId, UserId};

/// A skatepark attached to exactly one post.
///
/// Created alongside its post and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Skatepark {
    /// Unique skatepark ID.
    pub id: SkateparkId,
    /// Park name (≤50 chars).
    pub name: String,
    /// Prefecture the park is in (≤4 chars, a prefecture directory key).
    pub prefecture: String,
    /// City the park is in (≤10 chars).
    pub city: String,
    /// Optional image URL.
    pub image: Option<String>,
}

impl std::fmt::Display for Skatepark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.prefecture)
    }
}

/// A post about a skatepark.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique post ID.
    pub id: PostId,
    /// Author's user ID.
    pub author_id: UserId,
    /// Author's display name (joined from the users table).
    pub author_name: String,
    /// The skatepark this post is about.
    pub skatepark: Skatepark,
    /// Post body (≤300 chars).
    pub body: String,
    /// Server-assigned creation time.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 50 characters of the body, like a list preview
        write!(f, "{}", self.body.chars().take(50).collect::<String>())
    }
}

/// A comment on a post.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Unique comment ID.
    pub id: CommentId,
    /// The post this comment belongs to.
    pub post_id: PostId,
    /// Comment author's user ID.
    pub author_id: UserId,
    /// Comment author's display name.
    pub author_name: String,
    /// Comment body (non-empty, ≤300 chars).
    pub body: String,
    /// Server-assigned creation time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_skatepark() -> Skatepark {
        Skatepark {
            id: SkateparkId::new(1),
            name: "Test skatepark".to_string(),
            prefecture: "神奈川県".to_string(),
            city: "横浜市".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_skatepark_display_is_name_plus_prefecture() {
        assert_eq!(sample_skatepark().to_string(), "Test skatepark(神奈川県)");
    }

    #[test]
    fn test_post_display_is_first_50_chars_of_body() {
        let post = Post {
            id: PostId::new(1),
            author_id: UserId::new(1),
            author_name: "testuser".to_string(),
            skatepark: sample_skatepark(),
            body: "あ".repeat(80),
            created_at: Utc::now(),
        };
        assert_eq!(post.to_string(), "あ".repeat(50));
    }

    #[test]
    fn test_post_display_short_body_unchanged() {
        let post = Post {
            id: PostId::new(1),
            author_id: UserId::new(1),
            author_name: "testuser".to_string(),
            skatepark: sample_skatepark(),
            body: "short body".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(post.to_string(), "short body");
    }
}
