use serde_derive::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateLocationRequest {
    pub location_name: String,
    #[serde(default = "default_is_published")]
    pub location_is_published: bool,
}

#[derive(Deserialize, ToSchema, Default)]
pub struct UpdateLocationRequest {
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub location_is_published: Option<bool>,
}

fn default_is_published() -> bool {
    true
}
