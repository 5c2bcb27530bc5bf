use serde_derive::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct DeletePostResponse {
    pub deleted_post_id: i64,
}
