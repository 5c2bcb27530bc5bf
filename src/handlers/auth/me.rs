use std::sync::Arc;

use axum::{Extension, extract::State, response::IntoResponse};

use crate::{
    build_info::{AXUM_VERSION, BUILD_TIME},
    domain::{
        auth::{user::User, viewer::Viewer},
        policy::{access::AccessError, authorization::require_authenticated},
    },
    dto::responses::{auth::me_response::MeResponse, response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "The signed-in user", body = MeResponse),
        (status = 302, description = "Login required", body = CodeErrorResp)
    )
)]
pub async fn me_handler(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let user_id = require_authenticated(&viewer)?;

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    // The session may outlive its user
    let user = User::find_by_id(&mut conn, user_id)
        .await?
        .ok_or(AccessError::AuthenticationRequired)?;

    drop(conn);

    Ok(http_resp(
        MeResponse {
            user_email: user.user_email.clone(),
            user_is_superuser: user.user_is_superuser,
            user_info: user.into(),
            build_time: BUILD_TIME,
            axum_version: AXUM_VERSION,
        },
        (),
        start,
    ))
}
