use serde_derive::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user_id: Uuid,
    pub user_name: String,
}
