use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{RedisCache, connect_database},
    middlewares::{RateLimit, authentication},
    modules::{
        auth::{repository_pg::TokenRepositoryPg, service::AuthService},
        friend::{repository_pg::FriendRepositoryPg, service::FriendService},
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

/// Public user routes plus everything behind bearer-token authentication.
pub fn configure_api(throttle: RateLimit) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            web::scope("/api").configure(modules::user::route::configure).service(
                web::scope("")
                    .wrap(from_fn(authentication))
                    .configure(modules::friend::route::configure(throttle)),
            ),
        );
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    let redis_pool =
        RedisCache::new().await.map_err(|_| std::io::Error::other("Redis connection error"))?;

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let token_repo = Arc::new(TokenRepositoryPg::new(db_pool.clone()));
    let friend_repo = Arc::new(FriendRepositoryPg::new(db_pool.clone()));

    let user_service = UserService::with_dependencies(user_repo.clone(), ENV.search_page_size);
    let auth_service = AuthService::with_dependencies(user_repo.clone(), token_repo);
    let friend_service = FriendService::with_dependencies(friend_repo, user_repo);

    let throttle = RateLimit {
        scope: "friend_requests",
        limit: ENV.friend_request_rate_limit,
        window_secs: ENV.friend_request_rate_window,
        log: Arc::new(redis_pool),
    };

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .service(health_check)
            .configure(configure_api(throttle.clone()))
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
