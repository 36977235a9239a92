//! In-memory stand-ins for the Postgres repositories and the Redis throttle log.


use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};
use uuid::Uuid;

use crate::{
    api::error::{self, DbErrorMeta},
    configs::{Admission, ThrottleLog, admit_at},
    modules::{
        auth::{repository::TokenRepository, schema::TokenEntity},
        friend::{
            repository::{FriendRepo, FriendRequestRepository},
            schema::{FriendRequestAction, FriendRequestEntity, FriendRequestStatus},
        },
        user::{
            model::{InsertUser, UserSearch},
            repository::UserRepository,
            repository_pg::UserRepositoryPg,
            schema::UserEntity,
        },
    },
    utils::hash_password,
};

pub const PASSWORD: &str = "password123";

pub async fn insert_user(
    repo: &Arc<MemoryUserRepo>,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> UserEntity {
    repo.create(&InsertUser {
        email: email.into(),
        hash_password: hash_password(PASSWORD).unwrap(),
        first_name: first_name.into(),
        last_name: last_name.into(),
    })
    .await
    .unwrap()
}

/// Seeds a user row for the Postgres repository tests.
pub async fn insert_pg_user(
    pool: &sqlx::PgPool,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> UserEntity {
    UserRepositoryPg::new(pool.clone())
        .create(&InsertUser {
            email: email.into(),
            hash_password: "not-a-real-hash".into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        })
        .await
        .unwrap()
}

#[derive(Default)]
pub struct MemoryUserRepo {
    users: Mutex<Vec<UserEntity>>,
}

fn matches(search: &UserSearch, user: &UserEntity) -> bool {
    match search {
        UserSearch::Email(email) => user.email.to_lowercase() == email.to_lowercase(),
        UserSearch::Name(term) => {
            let term = term.to_lowercase();
            user.first_name.to_lowercase().contains(&term)
                || user.last_name.to_lowercase().contains(&term)
        }
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryUserRepo {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserEntity>, error::SystemError> {
        let users = self.users.lock().unwrap();
        Ok(ids.iter().filter_map(|id| users.iter().find(|u| u.id == *id).cloned()).collect())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        let email = email.to_lowercase();
        Ok(self.users.lock().unwrap().iter().find(|u| u.email.to_lowercase() == email).cloned())
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email.to_lowercase() == user.email.to_lowercase()) {
            return Err(error::SystemError::Conflict(Some(DbErrorMeta {
                code: Some("23505".into()),
                constraint: Some("users_email".into()),
                message: "duplicate key value violates unique constraint".into(),
            })));
        }

        let entity = UserEntity {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            hash_password: user.hash_password.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: chrono::Utc::now(),
        };
        users.push(entity.clone());
        Ok(entity)
    }

    async fn search(
        &self,
        search: &UserSearch,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| matches(search, u))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, search: &UserSearch) -> Result<i64, error::SystemError> {
        Ok(self.users.lock().unwrap().iter().filter(|u| matches(search, u)).count() as i64)
    }
}

#[derive(Default)]
pub struct MemoryFriendRepo {
    requests: Mutex<Vec<FriendRequestEntity>>,
}

#[async_trait::async_trait]
impl FriendRequestRepository for MemoryFriendRepo {
    async fn create_friend_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let request = FriendRequestEntity {
            id: Uuid::new_v4(),
            from_user_id: *sender_id,
            to_user_id: *receiver_id,
            status: FriendRequestStatus::Pending,
            created_at: chrono::Utc::now(),
        };
        self.requests.lock().unwrap().push(request.clone());
        Ok(request)
    }

    async fn find_friend_requests_to_user(
        &self,
        user_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.to_user_id == *user_id && r.status == status)
            .cloned()
            .collect())
    }

    async fn find_accepted_involving(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status == FriendRequestStatus::Accepted)
            .filter(|r| r.from_user_id == *user_id || r.to_user_id == *user_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl FriendRepo for MemoryFriendRepo {
    async fn respond_friend_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
        action: FriendRequestAction,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let mut requests = self.requests.lock().unwrap();
        let request = requests
            .iter_mut()
            .find(|r| r.id == *request_id)
            .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

        request.respond(user_id, action)?;
        Ok(request.clone())
    }
}

#[derive(Default)]
pub struct MemoryTokenRepo {
    tokens: Mutex<HashMap<Uuid, TokenEntity>>,
}

#[async_trait::async_trait]
impl TokenRepository for MemoryTokenRepo {
    async fn get_or_create(
        &self,
        user_id: &Uuid,
        candidate: &str,
    ) -> Result<TokenEntity, error::SystemError> {
        let mut tokens = self.tokens.lock().unwrap();
        let token = tokens.entry(*user_id).or_insert_with(|| TokenEntity {
            key: candidate.to_string(),
            user_id: *user_id,
            created_at: chrono::Utc::now(),
        });
        Ok(token.clone())
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<TokenEntity>, error::SystemError> {
        Ok(self.tokens.lock().unwrap().values().find(|t| t.key == key).cloned())
    }
}

/// Sliding log on a manual clock that starts at zero.
#[derive(Default)]
pub struct MemoryThrottleLog {
    now_ms: Mutex<i64>,
    history: Mutex<HashMap<String, VecDeque<i64>>>,
}

impl MemoryThrottleLog {
    pub fn advance(&self, by: Duration) {
        *self.now_ms.lock().unwrap() += by.as_millis() as i64;
    }
}

#[async_trait::async_trait]
impl ThrottleLog for MemoryThrottleLog {
    async fn admit(
        &self,
        key: &str,
        limit: u64,
        window_secs: u64,
    ) -> Result<Admission, error::SystemError> {
        let now = *self.now_ms.lock().unwrap();
        let mut history = self.history.lock().unwrap();
        Ok(admit_at(history.entry(key.to_string()).or_default(), now, limit, window_secs))
    }
}
