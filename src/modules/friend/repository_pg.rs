use uuid::Uuid;

use crate::{
    api::error,
    modules::friend::{
        repository::{FriendRepo, FriendRequestRepository},
        schema::{FriendRequestAction, FriendRequestEntity, FriendRequestStatus},
    },
};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for FriendRepositoryPg {
    async fn create_friend_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            INSERT INTO friend_requests (id, from_user_id, to_user_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(sender_id)
        .bind(receiver_id)
        .bind(FriendRequestStatus::Pending)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    async fn find_friend_requests_to_user(
        &self,
        user_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError> {
        let requests = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            SELECT *
            FROM friend_requests
            WHERE to_user_id = $1 AND status = $2
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn find_accepted_involving(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError> {
        let requests = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            SELECT *
            FROM friend_requests
            WHERE status = $2
              AND (from_user_id = $1 OR to_user_id = $1)
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .bind(FriendRequestStatus::Accepted)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}

#[async_trait::async_trait]
impl FriendRepo for FriendRepositoryPg {
    async fn respond_friend_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
        action: FriendRequestAction,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let mut request = sqlx::query_as::<_, FriendRequestEntity>(
            "SELECT * FROM friend_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

        // dropping `tx` rolls back
        request.respond(user_id, action)?;

        sqlx::query("UPDATE friend_requests SET status = $2 WHERE id = $1")
            .bind(request_id)
            .bind(request.status)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(request)
    }
}
