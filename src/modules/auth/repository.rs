use uuid::Uuid;

use crate::{api::error, modules::auth::schema::TokenEntity};

#[async_trait::async_trait]
pub trait TokenRepository {
    /// Returns the user's token, storing `candidate` only if the user has none yet.
    /// Must be a single atomic statement.
    async fn get_or_create(
        &self,
        user_id: &Uuid,
        candidate: &str,
    ) -> Result<TokenEntity, error::SystemError>;

    async fn find_by_key(&self, key: &str) -> Result<Option<TokenEntity>, error::SystemError>;
}
