use utoipa::ToSchema;

#[derive(serde_derive::Deserialize, ToSchema)]
pub struct LoginRequest {
    pub user_name: String,
    pub user_password: String,
}
