use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use diesel::{ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

use crate::{
    domain::{
        auth::viewer::Viewer,
        blog::post::Post,
        policy::{
            access::AccessError,
            authorization::{authorize_post_mutation, require_authenticated},
            visibility::PostSnapshot,
        },
    },
    dto::responses::{blog::delete_post_response::DeletePostResponse, response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::posts,
    util::time::now::tokio_now,
};

/// Comments go with the post.
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}",
    tag = "blog",
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = DeletePostResponse),
        (status = 302, description = "Login required, or not the author (redirects to the post)", body = CodeErrorResp),
        (status = 404, description = "Post missing or not visible", body = CodeErrorResp)
    )
)]
pub async fn delete_post(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<ServerState>>,
    Path(post_id): Path<i64>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    require_authenticated(&viewer)?;

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let (post, category) = Post::find_with_category(&mut conn, post_id)
        .await?
        .ok_or(AccessError::NotFound)?;

    let author_id = authorize_post_mutation(
        &PostSnapshot::of(&post, category.as_ref()),
        &viewer,
        Utc::now(),
    )?;

    diesel::delete(posts::table.filter(posts::post_id.eq(post_id)))
        .execute(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_DELETION_ERROR, e))?;

    drop(conn);

    tracing::info!(deleted_post_id = %post_id, author_id = %author_id, "Post deleted");

    Ok(http_resp(
        DeletePostResponse {
            deleted_post_id: post_id,
        },
        (),
        start,
    ))
}
