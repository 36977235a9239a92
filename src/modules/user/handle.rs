use actix_web::{get, post, web};

use crate::{
    api::{error, success},
    modules::{
        auth::service::AuthService,
        user::{
            model::{Page, SearchParams, SignInModel, SignUpModel, TokenResponse, UserSummary},
            service::UserService,
        },
    },
    utils::{ValidatedJson, ValidatedQuery},
};

#[post("/signup")]
pub async fn sign_up(
    user_service: web::Data<UserService>,
    auth_service: web::Data<AuthService>,
    user_data: ValidatedJson<SignUpModel>,
) -> Result<success::Success<TokenResponse>, error::Error> {
    let user = user_service.sign_up(user_data.0).await?;
    let token = auth_service.issue_token(&user).await?;
    Ok(success::Success::created(Some(TokenResponse { token })).message("Signup successful"))
}

#[post("/login")]
pub async fn login(
    auth_service: web::Data<AuthService>,
    user_data: ValidatedJson<SignInModel>,
) -> Result<success::Success<TokenResponse>, error::Error> {
    let user = auth_service.authenticate(&user_data.0.email, &user_data.0.password).await?;
    let token = auth_service.issue_token(&user).await?;
    Ok(success::Success::ok(Some(TokenResponse { token })).message("Login successful"))
}

#[get("/search")]
pub async fn search(
    user_service: web::Data<UserService>,
    query: ValidatedQuery<SearchParams>,
) -> Result<success::Success<Page<UserSummary>>, error::Error> {
    let page = user_service.search(&query.0.q, query.0.page).await?;
    Ok(success::Success::ok(Some(page)).message("Users retrieved successfully"))
}
