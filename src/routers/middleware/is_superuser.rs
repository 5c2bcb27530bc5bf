use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    domain::policy::access::AccessError,
    errors::code_error::{CodeError, HandlerResponse, code_err},
    init::state::ServerState,
    util::auth::is_superuser::is_superuser,
};

/// Lets the request through only for superusers.
///
/// Prerequisite:
/// - `auth_middleware` must have run earlier and inserted the authenticated `Uuid` user id into
///   request extensions.
pub async fn is_superuser_middleware(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
    next: Next,
) -> HandlerResponse<impl IntoResponse> {
    let user_id = request
        .extensions()
        .get::<Uuid>()
        .copied()
        .ok_or(AccessError::AuthenticationRequired)?;

    let allowed = is_superuser(state, user_id)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    if !allowed {
        return Err(code_err(
            CodeError::SUPERUSER_REQUIRED,
            "Superuser access required",
        ));
    }

    Ok(next.run(request).await)
}
