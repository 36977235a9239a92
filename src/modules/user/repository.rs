use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{
        model::{InsertUser, UserSearch},
        schema::UserEntity,
    },
};

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;

    /// Preserves the order of `ids`; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserEntity>, error::SystemError>;

    /// Case-insensitive exact match.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError>;

    async fn search(
        &self,
        search: &UserSearch,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError>;

    async fn count(&self, search: &UserSearch) -> Result<i64, error::SystemError>;
}
