use std::{str::FromStr, sync::Arc};

use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use serde_derive::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::responses::response_data::http_resp_with_cookies,
    errors::code_error::{CodeErrorResp, HandlerResponse},
    init::state::ServerState,
    routers::middleware::is_logged_in::SESSION_COOKIE,
    util::time::now::tokio_now,
};

#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    message: &'static str,
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session ended and cookie cleared", body = LogoutResponse),
        (status = 302, description = "Login required", body = CodeErrorResp)
    )
)]
pub async fn logout(
    State(state): State<Arc<ServerState>>,
    cookie_jar: CookieJar,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    if let Some(session_id) = cookie_jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::from_str(cookie.value()).ok())
        && let Some(session) = state.remove_session(&session_id).await
    {
        tracing::info!(user_id = %session.get_user_id(), "User logged out");
    }

    let removal = Cookie::build(SESSION_COOKIE).path("/").build();

    Ok(http_resp_with_cookies(
        LogoutResponse {
            message: "Logout successful",
        },
        (),
        start,
        None,
        Some(vec![removal]),
    ))
}
