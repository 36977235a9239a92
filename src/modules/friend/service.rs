use log::info;
use std::{collections::HashSet, sync::Arc};

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            repository::FriendRepo,
            schema::{FriendRequestAction, FriendRequestEntity, FriendRequestStatus},
        },
        user::{model::UserSummary, repository::UserRepository},
    },
};

#[derive(Clone)]
pub struct FriendService {
    friend_repo: Arc<dyn FriendRepo>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
}

impl FriendService {
    pub fn with_dependencies(
        friend_repo: Arc<dyn FriendRepo>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        info!("FriendService initialized with dependencies");
        FriendService { friend_repo, user_repo }
    }

    /// Duplicate pending requests between the same pair are allowed.
    pub async fn send_friend_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        if receiver_id == sender_id {
            return Err(error::SystemError::bad_request(
                "You can't send a friend request to yourself.",
            ));
        }

        if self.user_repo.find_by_id(&receiver_id).await?.is_none() {
            return Err(error::SystemError::validation(
                "to_user",
                format!("Invalid pk \"{receiver_id}\" - object does not exist."),
            ));
        }

        let request = self.friend_repo.create_friend_request(&sender_id, &receiver_id).await?;
        info!("Friend request {} sent from {} to {}", request.id, sender_id, receiver_id);

        Ok(request)
    }

    pub async fn accept_friend_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        self.respond(user_id, request_id, FriendRequestAction::Accept).await
    }

    pub async fn reject_friend_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        self.respond(user_id, request_id, FriendRequestAction::Reject).await
    }

    async fn respond(
        &self,
        user_id: Uuid,
        request_id: Uuid,
        action: FriendRequestAction,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let request =
            self.friend_repo.respond_friend_request_atomic(&request_id, &user_id, action).await?;
        info!("Friend request {} is now {:?}", request.id, request.status);
        Ok(request)
    }

    pub async fn get_pending_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError> {
        self.friend_repo.find_friend_requests_to_user(&user_id, FriendRequestStatus::Pending).await
    }

    pub async fn get_friends(&self, user_id: Uuid) -> Result<Vec<UserSummary>, error::SystemError> {
        let accepted = self.friend_repo.find_accepted_involving(&user_id).await?;
        let ids = friend_ids(&user_id, &accepted);
        let friends = self.user_repo.find_by_ids(&ids).await?;
        Ok(friends.into_iter().map(UserSummary::from).collect())
    }
}

/// Distinct counterparts of `user_id` across accepted requests, in first-seen order.
fn friend_ids(user_id: &Uuid, requests: &[FriendRequestEntity]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    requests
        .iter()
        .filter(|r| r.status == FriendRequestStatus::Accepted)
        .filter_map(|r| r.counterpart(user_id))
        .filter(|id| seen.insert(*id))
        .collect()
}
