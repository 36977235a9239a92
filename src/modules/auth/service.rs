use log::info;
use std::sync::Arc;

use crate::{
    api::error,
    modules::{
        auth::repository::TokenRepository,
        user::{repository::UserRepository, schema::UserEntity},
    },
    utils::{generate_token, verify_password},
};

const INVALID_CREDENTIALS: &str = "Invalid Credentials";

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository + Send + Sync>,
    token_repo: Arc<dyn TokenRepository + Send + Sync>,
}

impl AuthService {
    pub fn with_dependencies(
        user_repo: Arc<dyn UserRepository + Send + Sync>,
        token_repo: Arc<dyn TokenRepository + Send + Sync>,
    ) -> Self {
        info!("AuthService initialized with dependencies");
        AuthService { user_repo, token_repo }
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserEntity, error::SystemError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| error::SystemError::bad_request(INVALID_CREDENTIALS))?;

        if !verify_password(&user.hash_password, password)? {
            return Err(error::SystemError::bad_request(INVALID_CREDENTIALS));
        }

        Ok(user)
    }

    pub async fn issue_token(&self, user: &UserEntity) -> Result<String, error::SystemError> {
        let token = self.token_repo.get_or_create(&user.id, &generate_token()).await?;
        Ok(token.key)
    }

    pub async fn validate_token(&self, token: &str) -> Result<UserEntity, error::SystemError> {
        let stored = self
            .token_repo
            .find_by_key(token)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid token."))?;

        self.user_repo
            .find_by_id(&stored.user_id)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("User inactive or deleted."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{MemoryTokenRepo, MemoryUserRepo, insert_user};

    fn service(users: Arc<MemoryUserRepo>) -> AuthService {
        AuthService::with_dependencies(users, Arc::new(MemoryTokenRepo::default()))
    }

    #[actix_web::test]
    async fn authenticate_accepts_correct_password_any_email_case() {
        let users = Arc::new(MemoryUserRepo::default());
        let bob = insert_user(&users, "bob@example.com", "Bob", "Smith").await;
        let svc = service(users);

        let user = svc.authenticate("BOB@Example.com", "password123").await.unwrap();
        assert_eq!(user.id, bob.id);
    }

    #[actix_web::test]
    async fn bad_credentials_share_one_message() {
        let users = Arc::new(MemoryUserRepo::default());
        insert_user(&users, "bob@example.com", "Bob", "Smith").await;
        let svc = service(users);

        let wrong_password = svc.authenticate("bob@example.com", "nope").await.unwrap_err();
        let unknown_email = svc.authenticate("eve@example.com", "password123").await.unwrap_err();

        for err in [wrong_password, unknown_email] {
            assert!(matches!(err, error::SystemError::BadRequest(ref m) if m == INVALID_CREDENTIALS));
        }
    }

    #[actix_web::test]
    async fn token_issuance_is_idempotent() {
        let users = Arc::new(MemoryUserRepo::default());
        let bob = insert_user(&users, "bob@example.com", "Bob", "Smith").await;
        let alice = insert_user(&users, "alice@example.com", "Alice", "Doe").await;
        let svc = service(users);

        let first = svc.issue_token(&bob).await.unwrap();
        let second = svc.issue_token(&bob).await.unwrap();
        assert_eq!(first, second);
        assert_ne!(first, svc.issue_token(&alice).await.unwrap());
    }

    #[actix_web::test]
    async fn validate_token_resolves_owner() {
        let users = Arc::new(MemoryUserRepo::default());
        let bob = insert_user(&users, "bob@example.com", "Bob", "Smith").await;
        let svc = service(users);

        let token = svc.issue_token(&bob).await.unwrap();
        assert_eq!(svc.validate_token(&token).await.unwrap().id, bob.id);

        let err = svc.validate_token("not-a-token").await.unwrap_err();
        assert!(matches!(err, error::SystemError::Unauthorized(_)));
    }
}
