use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::friend::schema::{FriendRequestEntity, FriendRequestStatus};

/// Any `from_user` sent by the client is ignored; the sender is always the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FriendRequestBody {
    pub to_user: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestResponse {
    pub id: Uuid,
    pub from_user: Uuid,
    pub to_user: Uuid,
    pub status: FriendRequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<FriendRequestEntity> for FriendRequestResponse {
    fn from(entity: FriendRequestEntity) -> Self {
        FriendRequestResponse {
            id: entity.id,
            from_user: entity.from_user_id,
            to_user: entity.to_user_id,
            status: entity.status,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
