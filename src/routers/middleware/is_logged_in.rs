use std::{str::FromStr, sync::Arc};

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::{
    domain::auth::viewer::Viewer, errors::code_error::HandlerResponse, init::state::ServerState,
};

pub const SESSION_COOKIE: &str = "session_id";

/// Resolves the viewer for every request. A missing, malformed, unknown or
/// expired session cookie all mean `Viewer::Anonymous`.
pub async fn is_logged_in_middleware(
    State(state): State<Arc<ServerState>>,
    cookie_jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> HandlerResponse<impl IntoResponse> {
    let viewer = match cookie_jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::from_str(cookie.value()).ok())
    {
        Some(session_id) => match state.get_session(&session_id).await {
            Ok(session) => Viewer::Authenticated(session.get_user_id()),
            Err(_) => Viewer::Anonymous,
        },
        None => Viewer::Anonymous,
    };

    request.extensions_mut().insert(viewer);

    let response = next.run(request).await;

    Ok(response)
}
