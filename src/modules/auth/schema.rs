use sqlx::prelude::FromRow;
use uuid::Uuid;

#[allow(unused)]
#[derive(Debug, Clone, FromRow)]
pub struct TokenEntity {
    pub key: String,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
