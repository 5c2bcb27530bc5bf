use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use diesel::SelectableHelper;
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::location::{Location, NewLocation},
    dto::{
        requests::admin::location_request::CreateLocationRequest,
        responses::response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::locations,
    util::{string::validations::validate_title, time::now::tokio_now},
};

#[utoipa::path(
    post,
    path = "/api/admin/locations",
    tag = "admin",
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created", body = Location),
        (status = 400, description = "Invalid name", body = CodeErrorResp),
        (status = 403, description = "Superuser access required", body = CodeErrorResp)
    )
)]
pub async fn create_location(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CreateLocationRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    // Same 1-256 rule as titles
    if !validate_title(&request.location_name) {
        return Err(CodeError::TITLE_INVALID.into());
    }

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let location: Location = diesel::insert_into(locations::table)
        .values(NewLocation {
            location_name: &request.location_name,
            location_is_published: request.location_is_published,
        })
        .returning(Location::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_INSERTION_ERROR, e))?;

    drop(conn);

    Ok(http_resp(location, (), start).with_status(StatusCode::CREATED))
}
