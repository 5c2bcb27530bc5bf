use utoipa::{IntoParams, ToSchema};

/// `page` stays a string so that garbage falls back to the first page
/// instead of failing extraction.
#[derive(serde_derive::Deserialize, ToSchema, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct GetPostsRequest {
    #[serde(default)]
    pub page: Option<String>,
}
