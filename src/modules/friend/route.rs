use crate::{
    middlewares::{RateLimit, rate_limit},
    modules::friend::handle::*,
};
use actix_web::{
    middleware::from_fn,
    web::{self, ServiceConfig, scope},
};

pub fn configure(throttle: RateLimit) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.service(
            scope("/friend-requests")
                .service(
                    web::resource("")
                        .wrap(from_fn(rate_limit(throttle)))
                        .route(web::post().to(send_friend_request)),
                )
                .service(list_pending_requests)
                .service(list_friends)
                .service(accept_friend_request)
                .service(reject_friend_request),
        );
    }
}
