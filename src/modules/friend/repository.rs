use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::schema::{
    FriendRequestAction, FriendRequestEntity, FriendRequestStatus,
};

#[async_trait::async_trait]
pub trait FriendRequestRepository {
    async fn create_friend_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError>;

    /// Requests addressed to `user_id` with the given status, oldest first.
    async fn find_friend_requests_to_user(
        &self,
        user_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError>;

    /// Accepted requests where `user_id` is either sender or recipient, oldest first.
    async fn find_accepted_involving(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendRepo: FriendRequestRepository + Send + Sync {
    /// Locks the request, applies [`FriendRequestEntity::respond`] and persists the new
    /// status in one transaction.
    async fn respond_friend_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
        action: FriendRequestAction,
    ) -> Result<FriendRequestEntity, error::SystemError>;
}
