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
        blog::location::{Location, LocationChangeset},
        policy::access::AccessError,
    },
    dto::{
        requests::admin::location_request::UpdateLocationRequest,
        responses::response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::locations,
    util::{string::validations::validate_title, time::now::tokio_now},
};

#[utoipa::path(
    patch,
    path = "/api/admin/locations/{location_id}",
    tag = "admin",
    params(("location_id" = i64, Path, description = "Location id")),
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Location updated", body = Location),
        (status = 403, description = "Superuser access required", body = CodeErrorResp),
        (status = 404, description = "No such location", body = CodeErrorResp)
    )
)]
pub async fn update_location(
    State(state): State<Arc<ServerState>>,
    Path(location_id): Path<i64>,
    Json(request): Json<UpdateLocationRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    if let Some(name) = &request.location_name
        && !validate_title(name)
    {
        return Err(CodeError::TITLE_INVALID.into());
    }

    let changeset = LocationChangeset {
        location_name: request.location_name.as_deref(),
        location_is_published: request.location_is_published,
    };

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let location: Location = if changeset.location_name.is_none()
        && changeset.location_is_published.is_none()
    {
        locations::table
            .filter(locations::location_id.eq(location_id))
            .select(Location::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
    } else {
        diesel::update(locations::table.filter(locations::location_id.eq(location_id)))
            .set(changeset)
            .returning(Location::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| code_err(CodeError::DB_UPDATE_ERROR, e))?
    }
    .ok_or(AccessError::NotFound)?;

    drop(conn);

    Ok(http_resp(location, (), start))
}
