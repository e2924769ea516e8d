//! Form validation.
//!
//! Each entity has a static schema (field name → constraints) evaluated by
//! one generic validator into a [`FormErrors`] map that templates render
//! next to the offending field. Validation failure is ordinary control
//! flow: the page is re-rendered, nothing is persisted.
//!
//! Length bounds are counted in characters, not bytes, since most input is
//! Japanese text.

use std::collections::HashMap;

use serde::Deserialize;

use kickflip_core::regions;

/// A single field constraint.
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// The field must not be empty (after trimming).
    Required,
    /// The field must be at most this many characters.
    MaxChars(usize),
    /// The field must be at least this many characters.
    MinChars(usize),
    /// The field must be a key of the prefecture directory.
    KnownRegion,
}

/// A named field with its constraints.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub constraints: &'static [Constraint],
}

/// Field-level validation errors, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct FormErrors(HashMap<&'static str, Vec<String>>);

impl FormErrors {
    /// Add an error message for a field.
    pub fn add(&mut self, field: &'static str, message: String) {
        self.0.entry(field).or_default().push(message);
    }

    /// Whether no field has errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The messages for one field (empty slice if the field is clean).
    #[must_use]
    pub fn field(&self, name: &str) -> &[String] {
        self.0.get(name).map_or(&[], Vec::as_slice)
    }

    /// Merge another error map into this one.
    pub fn merge(&mut self, other: Self) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }
}

/// Evaluate a schema against `(field name, value)` pairs.
///
/// Constraints after a failed `Required` still run; a blank optional field
/// passes the length checks trivially because the empty string is short.
#[must_use]
pub fn validate(schema: &[Field], values: &[(&str, &str)]) -> FormErrors {
    let mut errors = FormErrors::default();

    for field in schema {
        let value = values
            .iter()
            .find(|(name, _)| *name == field.name)
            .map_or("", |(_, v)| *v);
        let chars = value.chars().count();

        for constraint in field.constraints {
            match constraint {
                Constraint::Required => {
                    if value.trim().is_empty() {
                        errors.add(field.name, "this field is required".to_string());
                    }
                }
                Constraint::MaxChars(max) => {
                    if chars > *max {
                        errors.add(field.name, format!("must be at most {max} characters"));
                    }
                }
                Constraint::MinChars(min) => {
                    if !value.is_empty() && chars < *min {
                        errors.add(field.name, format!("must be at least {min} characters"));
                    }
                }
                Constraint::KnownRegion => {
                    if !value.is_empty() && !regions::is_known(value) {
                        errors.add(field.name, "is not a known prefecture".to_string());
                    }
                }
            }
        }
    }

    errors
}

// =============================================================================
// Per-entity forms
// =============================================================================

/// Skatepark creation form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkateparkForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prefecture: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub image: String,
}

/// Schema for [`SkateparkForm`]; bounds match the database columns.
pub const SKATEPARK_SCHEMA: &[Field] = &[
    Field {
        name: "name",
        constraints: &[Constraint::Required, Constraint::MaxChars(50)],
    },
    Field {
        name: "prefecture",
        constraints: &[
            Constraint::Required,
            Constraint::MaxChars(4),
            Constraint::KnownRegion,
        ],
    },
    Field {
        name: "city",
        constraints: &[Constraint::Required, Constraint::MaxChars(10)],
    },
];

impl SkateparkForm {
    /// Validate against [`SKATEPARK_SCHEMA`].
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        validate(
            SKATEPARK_SCHEMA,
            &[
                ("name", &self.name),
                ("prefecture", &self.prefecture),
                ("city", &self.city),
            ],
        )
    }

    /// The image field as an optional value (blank input means none).
    #[must_use]
    pub fn image(&self) -> Option<String> {
        let trimmed = self.image.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Post creation form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub body: String,
}

/// Schema for [`PostForm`].
pub const POST_SCHEMA: &[Field] = &[Field {
    name: "body",
    constraints: &[Constraint::Required, Constraint::MaxChars(300)],
}];

impl PostForm {
    /// Validate against [`POST_SCHEMA`].
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        validate(POST_SCHEMA, &[("body", &self.body)])
    }
}

/// Comment submission form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub body: String,
}

/// Schema for [`CommentForm`].
pub const COMMENT_SCHEMA: &[Field] = &[Field {
    name: "body",
    constraints: &[Constraint::Required, Constraint::MaxChars(300)],
}];

impl CommentForm {
    /// Validate against [`COMMENT_SCHEMA`].
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        validate(COMMENT_SCHEMA, &[("body", &self.body)])
    }
}

/// Signup form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Schema for [`SignupForm`]; the email format itself is checked by
/// `Email::parse` in the auth service.
pub const SIGNUP_SCHEMA: &[Field] = &[
    Field {
        name: "email",
        constraints: &[Constraint::Required, Constraint::MaxChars(250)],
    },
    Field {
        name: "username",
        constraints: &[Constraint::Required, Constraint::MaxChars(100)],
    },
    Field {
        name: "password",
        constraints: &[Constraint::Required, Constraint::MinChars(8)],
    },
];

impl SignupForm {
    /// Validate against [`SIGNUP_SCHEMA`].
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        validate(
            SIGNUP_SCHEMA,
            &[
                ("email", &self.email),
                ("username", &self.username),
                ("password", &self.password),
            ],
        )
    }
}

/// Login form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skatepark_valid() {
        let form = SkateparkForm {
            name: "Test skatepark".to_string(),
            prefecture: "神奈川県".to_string(),
            city: "横浜市".to_string(),
            image: String::new(),
        };
        assert!(form.validate().is_empty());
        assert_eq!(form.image(), None);
    }

    #[test]
    fn test_skatepark_name_bound() {
        let mut form = SkateparkForm {
            name: "t".repeat(50),
            prefecture: "神奈川県".to_string(),
            city: "横浜市".to_string(),
            image: String::new(),
        };
        assert!(form.validate().is_empty());

        form.name = "t".repeat(51);
        let errors = form.validate();
        assert_eq!(errors.field("name"), ["must be at most 50 characters"]);
    }

    #[test]
    fn test_skatepark_prefecture_bound_counts_chars() {
        // 5 Japanese characters: over the 4-char column bound
        let form = SkateparkForm {
            name: "Test skatepark".to_string(),
            prefecture: "かながわ県".to_string(),
            city: "横浜市".to_string(),
            image: String::new(),
        };
        let errors = form.validate();
        assert!(!errors.field("prefecture").is_empty());
    }

    #[test]
    fn test_skatepark_unknown_prefecture() {
        let form = SkateparkForm {
            name: "Test skatepark".to_string(),
            prefecture: "蝦夷".to_string(),
            city: "横浜市".to_string(),
            image: String::new(),
        };
        let errors = form.validate();
        assert_eq!(errors.field("prefecture"), ["is not a known prefecture"]);
    }

    #[test]
    fn test_skatepark_city_bound() {
        let form = SkateparkForm {
            name: "Test skatepark".to_string(),
            prefecture: "神奈川県".to_string(),
            city: "あ".repeat(11),
            image: String::new(),
        };
        assert!(!form.validate().field("city").is_empty());
    }

    #[test]
    fn test_post_body_bound() {
        let mut form = PostForm {
            body: "a".repeat(300),
        };
        assert!(form.validate().is_empty());

        form.body = "a".repeat(301);
        assert_eq!(
            form.validate().field("body"),
            ["must be at most 300 characters"]
        );
    }

    #[test]
    fn test_comment_empty_body_rejected() {
        let form = CommentForm { body: String::new() };
        assert_eq!(form.validate().field("body"), ["this field is required"]);

        let blank = CommentForm {
            body: "   ".to_string(),
        };
        assert!(!blank.validate().is_empty());
    }

    #[test]
    fn test_comment_valid_body() {
        let form = CommentForm {
            body: "nice park".to_string(),
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_signup_password_min_length() {
        let mut form = SignupForm {
            email: "user@example.com".to_string(),
            username: "user".to_string(),
            password: "short".to_string(),
        };
        assert_eq!(
            form.validate().field("password"),
            ["must be at least 8 characters"]
        );

        form.password = "longenough".to_string();
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_merge_collects_both_forms() {
        let mut errors = SkateparkForm::default().validate();
        errors.merge(PostForm::default().validate());
        assert!(!errors.field("name").is_empty());
        assert!(!errors.field("body").is_empty());
    }
}
