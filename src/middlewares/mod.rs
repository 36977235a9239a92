use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};
use futures_util::{FutureExt, future::LocalBoxFuture};
use std::{rc::Rc, sync::Arc};

use crate::{
    api::error,
    configs::{Admission, ThrottleLog},
    modules::auth::{model::AuthUser, service::AuthService},
};

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    let header = req.headers().get("Authorization").and_then(|h| h.to_str().ok())?;
    header.strip_prefix("Bearer ").or_else(|| header.strip_prefix("Token ")).map(str::trim)
}

pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let token = match bearer_token(&req) {
        Some(t) if !t.is_empty() => t.to_owned(),
        _ => {
            return Err(
                error::Error::unauthorized("Authentication credentials were not provided.").into()
            );
        }
    };

    let auth_service = req
        .app_data::<web::Data<AuthService>>()
        .cloned()
        .ok_or_else(error::Error::internal_server_error)?;

    let user = auth_service.validate_token(&token).await.map_err(error::Error::from)?;

    req.extensions_mut().insert(AuthUser::from(&user));

    next.call(req).await
}

pub fn get_auth_user(req: &HttpRequest) -> Result<AuthUser, error::Error> {
    let extensions = req.extensions();

    let user = extensions
        .get::<AuthUser>()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))?
        .clone();

    Ok(user)
}

/// Per-caller sliding-window limit for one route group.
#[derive(Clone)]
pub struct RateLimit {
    pub scope: &'static str,
    pub limit: u64,
    pub window_secs: u64,
    pub log: Arc<dyn ThrottleLog>,
}

/// Must run after [`authentication`]; callers are keyed by user id.
pub fn rate_limit<B>(
    rule: RateLimit,
) -> impl Fn(
    ServiceRequest,
    Next<B>,
) -> LocalBoxFuture<'static, Result<ServiceResponse<B>, actix_web::Error>>
where
    B: MessageBody + 'static,
{
    let rule = Rc::new(rule);
    move |req: ServiceRequest, next: Next<B>| {
        let rule = rule.clone();
        async move {
            let user = get_auth_user(req.request())?;
            let key = format!("throttle:{}:{}", rule.scope, user.id);

            let admission = rule
                .log
                .admit(&key, rule.limit, rule.window_secs)
                .await
                .map_err(error::Error::from)?;
            if let Admission::Throttled { retry_after } = admission {
                log::warn!("User {} throttled on {} for {}s", user.email, rule.scope, retry_after);
                return Err(error::Error::too_many_requests(retry_after).into());
            }

            next.call(req).await
        }
        .boxed_local()
    }
}
