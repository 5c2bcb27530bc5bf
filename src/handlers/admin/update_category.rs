use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

use crate::{
    domain::{
        blog::category::{Category, CategoryChangeset, map_slug_violation},
        policy::access::AccessError,
    },
    dto::{
        requests::admin::category_request::UpdateCategoryRequest,
        responses::response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::categories,
    util::{
        string::validations::{validate_slug, validate_title},
        time::now::tokio_now,
    },
};

/// Unpublishing a category hides its posts from every public listing.
#[utoipa::path(
    patch,
    path = "/api/admin/categories/{category_id}",
    tag = "admin",
    params(("category_id" = i64, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 403, description = "Superuser access required", body = CodeErrorResp),
        (status = 404, description = "No such category", body = CodeErrorResp),
        (status = 409, description = "Slug already in use", body = CodeErrorResp)
    )
)]
pub async fn update_category(
    State(state): State<Arc<ServerState>>,
    Path(category_id): Path<i64>,
    Json(request): Json<UpdateCategoryRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    if let Some(title) = &request.category_title
        && !validate_title(title)
    {
        return Err(CodeError::TITLE_INVALID.into());
    }
    if let Some(slug) = &request.category_slug
        && !validate_slug(slug)
    {
        return Err(code_err(CodeError::SLUG_INVALID, slug));
    }

    let changeset = CategoryChangeset {
        category_title: request.category_title.as_deref(),
        category_description: request
            .category_description
            .as_ref()
            .map(|description| description.as_deref()),
        category_slug: request.category_slug.as_deref(),
        category_is_published: request.category_is_published,
    };

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let category: Category = if changeset.is_empty() {
        categories::table
            .filter(categories::category_id.eq(category_id))
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
    } else {
        diesel::update(categories::table.filter(categories::category_id.eq(category_id)))
            .set(changeset)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_slug_violation(CodeError::DB_UPDATE_ERROR))?
    }
    .ok_or(AccessError::NotFound)?;

    drop(conn);

    Ok(http_resp(category, (), start))
}
