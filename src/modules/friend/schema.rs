use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

use crate::api::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "friend_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A recipient's answer to a friend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRequestAction {
    Accept,
    Reject,
}

impl FriendRequestAction {
    pub fn target(self) -> FriendRequestStatus {
        match self {
            FriendRequestAction::Accept => FriendRequestStatus::Accepted,
            FriendRequestAction::Reject => FriendRequestStatus::Rejected,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            FriendRequestAction::Accept => "Request accepted",
            FriendRequestAction::Reject => "Request rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FriendRequestEntity {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub status: FriendRequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FriendRequestEntity {
    /// Applies the recipient's answer.
    ///
    /// The current status is not checked: an accepted request can be rejected
    /// later and vice versa. Only the recipient may answer.
    pub fn respond(
        &mut self,
        caller_id: &Uuid,
        action: FriendRequestAction,
    ) -> Result<(), error::SystemError> {
        if self.to_user_id != *caller_id {
            return Err(error::SystemError::forbidden("Not authorized."));
        }

        self.status = action.target();
        Ok(())
    }

    /// The other side of the request as seen from `user_id`, if `user_id` is a party to it.
    pub fn counterpart(&self, user_id: &Uuid) -> Option<Uuid> {
        if self.from_user_id == *user_id {
            Some(self.to_user_id)
        } else if self.to_user_id == *user_id {
            Some(self.from_user_id)
        } else {
            None
        }
    }
}
