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
        blog::{comment::Comment, post::Post},
        policy::{
            access::AccessError,
            authorization::{authorize_comment_mutation, require_authenticated},
            visibility::PostSnapshot,
        },
    },
    dto::responses::{
        blog::delete_comment_response::DeleteCommentResponse, response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::comments,
    util::time::now::tokio_now,
};

#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}/comments/{comment_id}",
    tag = "blog",
    params(
        ("post_id" = i64, Path, description = "Parent post id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = DeleteCommentResponse),
        (status = 302, description = "Login required, or not the author (redirects to the post)", body = CodeErrorResp),
        (status = 404, description = "Post or comment missing, or post not visible", body = CodeErrorResp)
    )
)]
pub async fn delete_comment(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<ServerState>>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
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
    let comment = Comment::find_under_post(&mut conn, post_id, comment_id)
        .await?
        .ok_or(AccessError::NotFound)?;

    authorize_comment_mutation(
        &comment,
        &PostSnapshot::of(&post, category.as_ref()),
        &viewer,
        Utc::now(),
    )?;

    diesel::delete(comments::table.filter(comments::comment_id.eq(comment_id)))
        .execute(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_DELETION_ERROR, e))?;

    drop(conn);

    tracing::info!(post_id = %post_id, deleted_comment_id = %comment_id, "Comment deleted");

    Ok(http_resp(
        DeleteCommentResponse {
            post_id,
            deleted_comment_id: comment_id,
        },
        (),
        start,
    ))
}
