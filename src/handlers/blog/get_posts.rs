use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
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

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "blog",
    params(GetPostsRequest),
    responses(
        (status = 200, description = "Published posts, newest first", body = FeedPage),
        (status = 500, description = "Database error", body = CodeErrorResp)
    )
)]
pub async fn get_posts(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<ServerState>>,
    Query(request): Query<GetPostsRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let feed = list_posts(
        &mut conn,
        &FeedScope::Global,
        &viewer,
        request.page.as_deref(),
        Utc::now(),
    )
    .await?;

    drop(conn);

    Ok(http_resp(feed, (), start))
}
