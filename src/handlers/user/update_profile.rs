use std::sync::Arc;

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

use crate::{
    domain::{
        auth::{
            user::{User, UserProfile, UserProfileChangeset, map_unique_violation},
            viewer::Viewer,
        },
        policy::{access::AccessError, authorization::require_authenticated},
    },
    dto::{
        requests::user::update_profile_request::UpdateProfileRequest,
        responses::response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::users,
    util::{string::validations::validate_username, time::now::tokio_now},
};

#[utoipa::path(
    patch,
    path = "/api/profile",
    tag = "user",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 302, description = "Login required", body = CodeErrorResp),
        (status = 400, description = "Invalid user name or email", body = CodeErrorResp),
        (status = 409, description = "User name or email already taken", body = CodeErrorResp)
    )
)]
pub async fn update_profile(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<ServerState>>,
    Json(request): Json<UpdateProfileRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let user_id = require_authenticated(&viewer)?;

    if let Some(user_name) = &request.user_name
        && !validate_username(user_name)
    {
        return Err(CodeError::USER_NAME_INVALID.into());
    }
    if let Some(user_email) = &request.user_email
        && !email_address::EmailAddress::is_valid(user_email)
    {
        return Err(CodeError::EMAIL_INVALID.into());
    }

    let changeset = UserProfileChangeset {
        user_name: request.user_name.as_deref(),
        user_email: request.user_email.as_deref(),
        user_first_name: request.user_first_name.as_deref(),
        user_last_name: request.user_last_name.as_deref(),
        user_updated_at: Utc::now(),
    };

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let user: User = diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set(changeset)
        .returning(User::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_unique_violation(CodeError::DB_UPDATE_ERROR))?
        .ok_or(AccessError::NotFound)?;

    drop(conn);

    Ok(http_resp(UserProfile::from(user), (), start))
}
