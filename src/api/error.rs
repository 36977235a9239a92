#![allow(unused)]
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use deadpool_redis::{CreatePoolError, PoolError, redis::RedisError};
use std::borrow::Cow;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Invalid {field}: {message}")]
    Validation { field: Cow<'static, str>, message: Cow<'static, str> },
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),
    #[error("Too Many Requests: retry after {retry_after}s")]
    TooManyRequests { retry_after: u64 },
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub error: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Cow<'static, str>>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn too_many_requests(retry_after: u64) -> Self {
        Self::TooManyRequests { retry_after }
    }

    pub fn internal_server_error() -> Self {
        Self::InternalServer
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) | Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        match self {
            // Has Message
            Error::NotFound(msg)
            | Error::Conflict(msg)
            | Error::Unauthorized(msg)
            | Error::BadRequest(msg)
            | Error::Forbidden(msg) => res.json(ErrorBody { error: msg.clone(), field: None }),
            Error::TooManyRequests { retry_after } => {
                res.insert_header(("Retry-After", retry_after.to_string())).json(ErrorBody {
                    error: format!(
                        "Request was throttled. Expected available in {retry_after} seconds."
                    )
                    .into(),
                    field: None,
                })
            }
            Error::Validation { field, message } => {
                res.json(ErrorBody { error: message.clone(), field: Some(field.clone()) })
            }
            // No Message
            Error::InternalServer => {
                res.json(ErrorBody { error: "Internal Server Error".into(), field: None })
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // argon2 errors
    #[error("Hash Error")]
    HashError(#[from] argon2::password_hash::Error),
    // sqlx errors
    #[error("Database Error : {0}")]
    DatabaseError(Cow<'static, str>),
    #[error("Migration Error")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
    // serde errors
    #[error("JSON Serialization/Deserialization Error")]
    JsonError(#[from] serde_json::Error),
    // redis errors
    #[error(transparent)]
    PoolInit(#[from] CreatePoolError),
    #[error("Redis pool error: {0}")]
    PoolGet(#[from] PoolError),
    #[error("Redis error")]
    RedisError(#[from] RedisError),
    // Custom Errors
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Invalid {field}: {message}")]
    Validation { field: Cow<'static, str>, message: Cow<'static, str> },
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error("Database Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Database Conflict: {0:?}")]
    Conflict(Option<DbErrorMeta>),
    #[error("Too Many Requests: retry after {retry_after}s")]
    TooManyRequests { retry_after: u64 },
    #[error("Internal System Error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

fn conflict_message(meta: &Option<DbErrorMeta>) -> Cow<'static, str> {
    let Some(m) = meta else {
        return "Duplicate value".into();
    };

    let Some(constraint) = &m.constraint else {
        return "Duplicate value".into();
    };

    let field = constraint.split('_').next_back().unwrap_or("value");

    let mut chars = field.chars();
    let field = match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Value".to_string(),
    };

    format!("{field} already exists").into()
}

#[derive(Debug)]
pub struct DbErrorMeta {
    pub code: Option<String>,
    pub constraint: Option<String>,
    pub message: String,
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::BadRequest(msg) => Error::BadRequest(msg),
            SystemError::Validation { field, message } => Error::Validation { field, message },
            SystemError::Unauthorized(msg) => Error::Unauthorized(msg),
            SystemError::Forbidden(msg) => Error::Forbidden(msg),
            SystemError::NotFound(msg) => Error::NotFound(msg),
            SystemError::Conflict(meta) => Error::Conflict(conflict_message(&meta)),
            SystemError::TooManyRequests { retry_after } => Error::TooManyRequests { retry_after },
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}

/// Client-facing text for a CHECK violation; the raw Postgres message names the constraint.
fn check_violation_message(constraint: Option<&str>) -> Cow<'static, str> {
    match constraint {
        Some("friend_requests_not_self") => "You can't send a friend request to yourself.".into(),
        _ => "Invalid value.".into(),
    }
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some("23505") => {
                    return SystemError::Conflict(Some(DbErrorMeta {
                        code: db_err.code().map(|s| s.to_string()),
                        constraint: db_err.constraint().map(|s| s.to_string()),
                        message: db_err.message().to_string(),
                    }));
                }
                Some("23514") => {
                    log::warn!("Check violation: {:?}", db_err.constraint());
                    return SystemError::BadRequest(check_violation_message(db_err.constraint()));
                }
                _ => {
                    log::error!("Unhandled DB error: {:?}", db_err);
                    return SystemError::DatabaseError(db_err.message().to_string().into());
                }
            }
        }
        log::error!("{:?}", err);
        SystemError::InternalError(Box::new(err))
    }
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn validation(
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn too_many_requests(retry_after: u64) -> Self {
        Self::TooManyRequests { retry_after }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_uses_constraint_suffix() {
        let meta = Some(DbErrorMeta {
            code: Some("23505".into()),
            constraint: Some("users_email".into()),
            message: "duplicate key value violates unique constraint".into(),
        });
        assert_eq!(conflict_message(&meta), "Email already exists");
        assert_eq!(conflict_message(&None), "Duplicate value");
    }

    #[test]
    fn system_errors_map_to_status_codes() {
        let cases = [
            (SystemError::bad_request("x"), StatusCode::BAD_REQUEST),
            (SystemError::validation("email", "taken"), StatusCode::BAD_REQUEST),
            (SystemError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (SystemError::forbidden("x"), StatusCode::FORBIDDEN),
            (SystemError::not_found("x"), StatusCode::NOT_FOUND),
            (SystemError::too_many_requests(12), StatusCode::TOO_MANY_REQUESTS),
            (SystemError::DatabaseError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(Error::from(err).status_code(), status);
        }
    }

    #[test]
    fn throttled_response_carries_retry_after() {
        let res = Error::too_many_requests(42).error_response();
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(res.headers().get("Retry-After").unwrap(), "42");
    }

    #[test]
    fn check_violations_never_leak_constraint_names() {
        assert_eq!(
            check_violation_message(Some("friend_requests_not_self")),
            "You can't send a friend request to yourself."
        );
        assert_eq!(check_violation_message(Some("some_other_check")), "Invalid value.");
        assert_eq!(check_violation_message(None), "Invalid value.");
    }
}
