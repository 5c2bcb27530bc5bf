use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use diesel::SelectableHelper;
use diesel_async::RunQueryDsl;

use crate::{
    domain::{
        auth::viewer::Viewer,
        blog::post::{NewPost, Post, map_reference_violation},
        policy::authorization::require_authenticated,
    },
    dto::{
        requests::blog::submit_post_request::SubmitPostRequest,
        responses::response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::posts,
    util::{string::validations::validate_title, time::now::tokio_now},
};

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "blog",
    request_body = SubmitPostRequest,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 302, description = "Login required", body = CodeErrorResp),
        (status = 400, description = "Invalid title or unknown category/location", body = CodeErrorResp)
    )
)]
pub async fn submit_post(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SubmitPostRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let author_id = require_authenticated(&viewer)?;

    if !validate_title(&request.post_title) {
        return Err(CodeError::TITLE_INVALID.into());
    }

    let new_post = NewPost {
        post_title: &request.post_title,
        post_text: request.post_text.as_deref(),
        post_pub_date: request.post_pub_date,
        user_id: author_id,
        location_id: request.location_id,
        category_id: request.category_id,
        post_image: request.post_image.as_deref(),
        post_is_published: request.post_is_published,
    };

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let post: Post = diesel::insert_into(posts::table)
        .values(new_post)
        .returning(Post::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(map_reference_violation(CodeError::DB_INSERTION_ERROR))?;

    drop(conn);

    tracing::info!(post_id = %post.post_id, author_id = %author_id, "Post created");

    Ok(http_resp(post, (), start).with_status(StatusCode::CREATED))
}
