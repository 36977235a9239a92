use uuid::Uuid;

use crate::{
    api::error,
    modules::auth::{repository::TokenRepository, schema::TokenEntity},
};

#[derive(Clone)]
pub struct TokenRepositoryPg {
    pool: sqlx::PgPool,
}

impl TokenRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl TokenRepository for TokenRepositoryPg {
    async fn get_or_create(
        &self,
        user_id: &Uuid,
        candidate: &str,
    ) -> Result<TokenEntity, error::SystemError> {
        // the no-op update makes RETURNING yield the existing row on conflict
        let token = sqlx::query_as::<_, TokenEntity>(
            r#"
            INSERT INTO auth_tokens (key, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING *
            "#,
        )
        .bind(candidate)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(token)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<TokenEntity>, error::SystemError> {
        let token =
            sqlx::query_as::<_, TokenEntity>("SELECT * FROM auth_tokens WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(token)
    }
}
