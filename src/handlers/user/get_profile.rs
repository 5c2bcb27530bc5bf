use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    domain::{
        auth::viewer::Viewer,
        feed::{
            assembler::{FeedPage, list_posts},
            filter::FeedScope,
        },
    },
    dto::{requests::blog::get_posts_request::GetPostsRequest, responses::response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

/// Authors see all of their own posts, drafts and scheduled ones included;
/// everybody else sees the public ones.
#[utoipa::path(
    get,
    path = "/api/profile/{user_name}",
    tag = "user",
    params(
        ("user_name" = String, Path, description = "User name of the author"),
        GetPostsRequest
    ),
    responses(
        (status = 200, description = "Profile with the author's posts", body = FeedPage),
        (status = 404, description = "No such user", body = CodeErrorResp)
    )
)]
pub async fn get_profile(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<ServerState>>,
    Path(user_name): Path<String>,
    Query(request): Query<GetPostsRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let feed = list_posts(
        &mut conn,
        &FeedScope::Author(user_name),
        &viewer,
        request.page.as_deref(),
        Utc::now(),
    )
    .await?;

    drop(conn);

    Ok(http_resp(feed, (), start))
}
