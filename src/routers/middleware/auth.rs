use axum::{body::Body, extract::Request, middleware::Next, response::IntoResponse};

use crate::{
    domain::{auth::viewer::Viewer, policy::authorization::require_authenticated},
    errors::code_error::HandlerResponse,
};

/// Must run inside `is_logged_in_middleware`. Anonymous viewers are sent to
/// the login page; signed-in viewers get their user id added to the request
/// extensions for the layers below.
pub async fn auth_middleware(
    mut request: Request<Body>,
    next: Next,
) -> HandlerResponse<impl IntoResponse> {
    let viewer = request
        .extensions()
        .get::<Viewer>()
        .copied()
        .unwrap_or(Viewer::Anonymous);

    let user_id = require_authenticated(&viewer)?;
    request.extensions_mut().insert(user_id);

    let response = next.run(request).await;

    Ok(response)
}
