use actix_web::{HttpRequest, get, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_auth_user,
    modules::{
        friend::{
            model::{FriendRequestBody, FriendRequestResponse, StatusResponse},
            schema::FriendRequestAction,
            service::FriendService,
        },
        user::model::UserSummary,
    },
    utils::ValidatedJson,
};

/// Mounted through a rate-limited resource in [`super::route::configure`].
pub async fn send_friend_request(
    friend_service: web::Data<FriendService>,
    body: ValidatedJson<FriendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestResponse>, error::Error> {
    let sender_id = get_auth_user(&req)?.id;
    let request = friend_service.send_friend_request(sender_id, body.0.to_user).await?;

    Ok(success::Success::created(Some(request.into())).message("Friend request sent successfully"))
}

#[get("/pending")]
pub async fn list_pending_requests(
    friend_service: web::Data<FriendService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendRequestResponse>>, error::Error> {
    let user_id = get_auth_user(&req)?.id;
    let requests = friend_service.get_pending_requests(user_id).await?;
    let requests: Vec<FriendRequestResponse> =
        requests.into_iter().map(FriendRequestResponse::from).collect();

    Ok(success::Success::ok(Some(requests)).message("Pending friend requests retrieved successfully"))
}

#[get("/friends")]
pub async fn list_friends(
    friend_service: web::Data<FriendService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<UserSummary>>, error::Error> {
    let user_id = get_auth_user(&req)?.id;
    let friends = friend_service.get_friends(user_id).await?;

    Ok(success::Success::ok(Some(friends)).message("Friends retrieved successfully"))
}

#[post("/{request_id}/accept")]
pub async fn accept_friend_request(
    friend_service: web::Data<FriendService>,
    request_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<StatusResponse>, error::Error> {
    let receiver_id = get_auth_user(&req)?.id;
    friend_service.accept_friend_request(receiver_id, *request_id).await?;

    let status = FriendRequestAction::Accept.message();
    Ok(success::Success::ok(Some(StatusResponse { status: status.into() })).message(status))
}

#[post("/{request_id}/reject")]
pub async fn reject_friend_request(
    friend_service: web::Data<FriendService>,
    request_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<StatusResponse>, error::Error> {
    let receiver_id = get_auth_user(&req)?.id;
    friend_service.reject_friend_request(receiver_id, *request_id).await?;

    let status = FriendRequestAction::Reject.message();
    Ok(success::Success::ok(Some(StatusResponse { status: status.into() })).message(status))
}
