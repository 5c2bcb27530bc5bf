use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    domain::{
        auth::viewer::Viewer,
        blog::{
            comment::{Comment, CommentForm},
            post::Post,
        },
        feed::assembler::assemble_cards,
        policy::{
            access::AccessError,
            visibility::{PostSnapshot, can_view},
        },
    },
    dto::responses::{blog::read_post_response::ReadPostResponse, response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

/// Hidden posts answer exactly like missing ones.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}",
    tag = "blog",
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post with its comment thread", body = ReadPostResponse),
        (status = 404, description = "Post missing or not visible to the viewer", body = CodeErrorResp)
    )
)]
pub async fn read_post(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<ServerState>>,
    Path(post_id): Path<i64>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();
    let now = Utc::now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let (post, category) = Post::find_with_category(&mut conn, post_id)
        .await?
        .ok_or(AccessError::NotFound)?;

    if !can_view(&PostSnapshot::of(&post, category.as_ref()), &viewer, now) {
        return Err(AccessError::NotFound.into());
    }

    let comments = Comment::thread(&mut conn, post_id).await?;
    let card = assemble_cards(&mut conn, vec![(post, category)])
        .await?
        .pop()
        .ok_or(AccessError::NotFound)?;

    drop(conn);

    Ok(http_resp(
        ReadPostResponse {
            post: card,
            comments,
            comment_form: CommentForm::default(),
        },
        (),
        start,
    ))
}
