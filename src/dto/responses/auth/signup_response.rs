use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::domain::auth::user::UserProfile;

#[derive(Serialize, ToSchema)]
pub struct SignupResponse {
    pub user: UserProfile,
}
