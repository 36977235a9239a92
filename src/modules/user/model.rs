use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::user::schema::UserEntity;

#[derive(Deserialize, Validate)]
pub struct SignUpModel {
    #[validate(
        length(min = 1, message = "Email and password are required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "First name must be at most 150 characters long"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Last name must be at most 150 characters long"))]
    pub last_name: String,
}

#[derive(Deserialize, Validate)]
pub struct SignInModel {
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<u32>,
}

pub struct InsertUser {
    pub email: String,
    pub hash_password: String,
    pub first_name: String,
    pub last_name: String,
}

/// How a search query is matched against users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSearch {
    /// Case-insensitive exact match on email.
    Email(String),
    /// Case-insensitive substring match on first or last name.
    Name(String),
}

impl UserSearch {
    pub fn parse(query: &str) -> Self {
        if query.contains('@') {
            UserSearch::Email(query.to_string())
        } else {
            UserSearch::Name(query.to_string())
        }
    }
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserEntity> for UserSummary {
    fn from(entity: UserEntity) -> Self {
        UserSummary {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub page: u32,
    pub page_size: u32,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_sign_selects_email_search() {
        assert_eq!(
            UserSearch::parse("Bob@Example.com"),
            UserSearch::Email("Bob@Example.com".into())
        );
        assert_eq!(UserSearch::parse("bo"), UserSearch::Name("bo".into()));
        assert_eq!(UserSearch::parse(""), UserSearch::Name(String::new()));
    }

    #[test]
    fn signup_requires_email_and_password() {
        let model = SignUpModel {
            email: String::new(),
            password: "secret".into(),
            first_name: String::new(),
            last_name: String::new(),
        };
        assert!(model.validate().is_err());

        let model = SignUpModel {
            email: "bob@example.com".into(),
            password: "secret".into(),
            first_name: "Bob".into(),
            last_name: String::new(),
        };
        assert!(model.validate().is_ok());
    }
}
