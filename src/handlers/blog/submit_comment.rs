use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

use crate::{
    domain::{
        auth::viewer::Viewer,
        blog::{
            comment::{Comment, CommentView, NewComment},
            post::Post,
        },
        policy::{
            access::AccessError,
            authorization::{authorize_comment_creation, require_authenticated},
            visibility::PostSnapshot,
        },
    },
    dto::{
        requests::blog::submit_comment_request::SubmitCommentRequest,
        responses::response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::{comments, users},
    util::{string::validations::validate_comment, time::now::tokio_now},
};

#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/comment",
    tag = "blog",
    params(("post_id" = i64, Path, description = "Parent post id")),
    request_body = SubmitCommentRequest,
    responses(
        (status = 201, description = "Comment added", body = CommentView),
        (status = 302, description = "Login required", body = CodeErrorResp),
        (status = 404, description = "Parent post missing or not visible", body = CodeErrorResp)
    )
)]
pub async fn submit_comment(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<ServerState>>,
    Path(post_id): Path<i64>,
    Json(request): Json<SubmitCommentRequest>,
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

    let user_id = authorize_comment_creation(
        &PostSnapshot::of(&post, category.as_ref()),
        &viewer,
        Utc::now(),
    )?;

    if !validate_comment(&request.comment_text) {
        return Err(CodeError::COMMENT_INVALID.into());
    }

    let comment: Comment = diesel::insert_into(comments::table)
        .values(NewComment {
            comment_text: &request.comment_text,
            post_id,
            user_id,
        })
        .returning(Comment::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_INSERTION_ERROR, e))?;

    let user_name: String = users::table
        .filter(users::user_id.eq(user_id))
        .select(users::user_name)
        .first(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    drop(conn);

    Ok(
        http_resp(CommentView::new(comment, user_name), (), start)
            .with_status(StatusCode::CREATED),
    )
}
