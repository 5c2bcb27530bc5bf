use chrono::{DateTime, Utc};
use serde_derive::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct SubmitPostRequest {
    pub post_title: String,
    #[serde(default)]
    pub post_text: Option<String>,
    #[serde(default)]
    pub post_pub_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub post_image: Option<String>,
    #[serde(default = "default_is_published")]
    pub post_is_published: bool,
}

fn default_is_published() -> bool {
    true
}
