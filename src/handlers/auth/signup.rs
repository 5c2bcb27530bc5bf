use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    domain::auth::user::{User, UserInsertable},
    dto::{
        requests::auth::signup_request::SignupRequest,
        responses::{auth::signup_response::SignupResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    util::{
        crypto::hash_pw::hash_pw,
        string::validations::{validate_password_form, validate_username},
        time::now::tokio_now,
    },
};

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Invalid user name, email or password", body = CodeErrorResp),
        (status = 409, description = "User name or email already taken", body = CodeErrorResp)
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SignupRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    // Check forms first; hashing is the expensive part
    if !validate_username(&request.user_name) {
        return Err(CodeError::USER_NAME_INVALID.into());
    }

    if !email_address::EmailAddress::is_valid(&request.user_email) {
        return Err(CodeError::EMAIL_INVALID.into());
    }

    if !validate_password_form(&request.user_password) {
        return Err(CodeError::PASSWORD_INVALID.into());
    }

    let hashed_pw = hash_pw(request.user_password.clone())
        .await
        .map_err(|e| code_err(CodeError::COULD_NOT_HASH_PW, e))?;

    let new_user = UserInsertable::new(
        &request.user_name,
        &request.user_email,
        &request.user_first_name,
        &request.user_last_name,
        &hashed_pw,
    );

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let user = User::insert_one(&mut conn, new_user).await?;

    drop(conn);

    tracing::info!(user_id = %user.user_id, user_name = %user.user_name, "User signed up");

    Ok(
        http_resp(SignupResponse { user: user.into() }, (), start)
            .with_status(StatusCode::CREATED),
    )
}
