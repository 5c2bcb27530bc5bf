use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::{
    domain::auth::user::User,
    dto::{
        requests::auth::login_request::LoginRequest,
        responses::{auth::login_response::LoginResponse, response_data::http_resp_with_cookies},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    routers::middleware::is_logged_in::SESSION_COOKIE,
    util::{crypto::verify_pw::verify_pw, time::now::tokio_now},
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; sets the session_id cookie", body = LoginResponse),
        (status = 401, description = "Wrong user name or password", body = CodeErrorResp)
    )
)]
pub async fn login(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<LoginRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let user = User::find_by_name(&mut conn, &request.user_name).await?;

    drop(conn);

    // Unknown user and wrong password look the same to the client
    let user = user.ok_or(CodeError::WRONG_CREDENTIALS)?;

    match verify_pw(&request.user_password, &user.user_password_hash).await {
        Ok(true) => (),
        Ok(false) => return Err(CodeError::WRONG_CREDENTIALS.into()),
        Err(e) => return Err(code_err(CodeError::COULD_NOT_VERIFY_PW, e)),
    }

    let session_id = state
        .new_session(user.user_id)
        .await
        .map_err(|e| code_err(CodeError::SESSION_ID_ALREADY_EXISTS, e))?;

    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .secure(state.get_deployment_environment().uses_secure_cookies())
        .same_site(SameSite::Strict)
        .build();

    tracing::info!(user_id = %user.user_id, "User logged in");

    Ok(http_resp_with_cookies(
        LoginResponse {
            message: "Login successful",
            user_id: user.user_id,
            user_name: user.user_name,
        },
        (),
        start,
        Some(vec![cookie]),
        None,
    ))
}
