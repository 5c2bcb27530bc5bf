use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::domain::auth::user::UserProfile;

#[derive(Serialize, ToSchema)]
pub struct MeResponse {
    pub user_info: UserProfile,
    pub user_email: String,
    pub user_is_superuser: bool,
    pub build_time: &'static str,
    pub axum_version: &'static str,
}
