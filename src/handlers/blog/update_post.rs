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
        blog::post::{Post, map_reference_violation},
        policy::{
            access::AccessError,
            authorization::{authorize_post_mutation, require_authenticated},
            visibility::PostSnapshot,
        },
    },
    dto::{
        requests::blog::update_post_request::UpdatePostRequest,
        responses::response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::posts,
    util::{string::validations::validate_title, time::now::tokio_now},
};

#[utoipa::path(
    patch,
    path = "/api/posts/{post_id}",
    tag = "blog",
    params(("post_id" = i64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 302, description = "Login required, or not the author (redirects to the post)", body = CodeErrorResp),
        (status = 404, description = "Post missing or not visible", body = CodeErrorResp)
    )
)]
pub async fn update_post(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<ServerState>>,
    Path(post_id): Path<i64>,
    Json(request): Json<UpdatePostRequest>,
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

    authorize_post_mutation(
        &PostSnapshot::of(&post, category.as_ref()),
        &viewer,
        Utc::now(),
    )?;

    if let Some(title) = &request.post_title
        && !validate_title(title)
    {
        return Err(CodeError::TITLE_INVALID.into());
    }

    let changeset = request.as_changeset();
    if changeset.is_empty() {
        return Ok(http_resp(post, (), start));
    }

    let updated: Post = diesel::update(posts::table.filter(posts::post_id.eq(post_id)))
        .set(changeset)
        .returning(Post::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(map_reference_violation(CodeError::DB_UPDATE_ERROR))?;

    drop(conn);

    Ok(http_resp(updated, (), start))
}
