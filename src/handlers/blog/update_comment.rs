use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

use crate::{
    domain::{
        auth::viewer::Viewer,
        blog::{
            comment::{Comment, CommentView},
            post::Post,
        },
        policy::{
            access::AccessError,
            authorization::{authorize_comment_mutation, require_authenticated},
            visibility::PostSnapshot,
        },
    },
    dto::{
        requests::blog::update_comment_request::UpdateCommentRequest,
        responses::response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::{comments, users},
    util::{string::validations::validate_comment, time::now::tokio_now},
};

#[utoipa::path(
    patch,
    path = "/api/posts/{post_id}/comments/{comment_id}",
    tag = "blog",
    params(
        ("post_id" = i64, Path, description = "Parent post id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentView),
        (status = 302, description = "Login required, or not the author (redirects to the post)", body = CodeErrorResp),
        (status = 404, description = "Post or comment missing, or post not visible", body = CodeErrorResp)
    )
)]
pub async fn update_comment(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<ServerState>>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateCommentRequest>,
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

    let author_id = authorize_comment_mutation(
        &comment,
        &PostSnapshot::of(&post, category.as_ref()),
        &viewer,
        Utc::now(),
    )?;

    if !validate_comment(&request.comment_text) {
        return Err(CodeError::COMMENT_INVALID.into());
    }

    let updated: Comment =
        diesel::update(comments::table.filter(comments::comment_id.eq(comment_id)))
            .set(comments::comment_text.eq(&request.comment_text))
            .returning(Comment::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| code_err(CodeError::DB_UPDATE_ERROR, e))?;

    let user_name: String = users::table
        .filter(users::user_id.eq(author_id))
        .select(users::user_name)
        .first(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    drop(conn);

    Ok(http_resp(CommentView::new(updated, user_name), (), start))
}
