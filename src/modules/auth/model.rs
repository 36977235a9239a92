use uuid::Uuid;

use crate::modules::user::schema::UserEntity;

/// Caller identity attached to the request by the authentication middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

impl From<&UserEntity> for AuthUser {
    fn from(user: &UserEntity) -> Self {
        AuthUser { id: user.id, email: user.email.clone() }
    }
}
