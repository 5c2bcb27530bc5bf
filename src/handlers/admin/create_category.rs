use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use diesel::SelectableHelper;
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::category::{Category, NewCategory, map_slug_violation},
    dto::{
        requests::admin::category_request::CreateCategoryRequest,
        responses::response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::categories,
    util::{
        string::{
            generate_slug::generate_slug,
            validations::{validate_slug, validate_title},
        },
        time::now::tokio_now,
    },
};

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    tag = "admin",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid title or slug", body = CodeErrorResp),
        (status = 403, description = "Superuser access required", body = CodeErrorResp),
        (status = 409, description = "Slug already in use", body = CodeErrorResp)
    )
)]
pub async fn create_category(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CreateCategoryRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    if !validate_title(&request.category_title) {
        return Err(CodeError::TITLE_INVALID.into());
    }

    let slug = match &request.category_slug {
        Some(slug) => slug.clone(),
        None => generate_slug(&request.category_title),
    };
    if !validate_slug(&slug) {
        return Err(code_err(CodeError::SLUG_INVALID, &slug));
    }

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let category: Category = diesel::insert_into(categories::table)
        .values(NewCategory {
            category_title: &request.category_title,
            category_description: request.category_description.as_deref(),
            category_slug: &slug,
            category_is_published: request.category_is_published,
        })
        .returning(Category::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(map_slug_violation(CodeError::DB_INSERTION_ERROR))?;

    drop(conn);

    tracing::info!(category_id = %category.category_id, slug = %category.category_slug, "Category created");

    Ok(http_resp(category, (), start).with_status(StatusCode::CREATED))
}
