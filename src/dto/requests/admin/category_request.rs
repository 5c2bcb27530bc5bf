use serde_derive::Deserialize;
use utoipa::ToSchema;

use crate::dto::common::double_option::double_option;

/// A missing slug is generated from the title.
#[derive(Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub category_title: String,
    #[serde(default)]
    pub category_description: Option<String>,
    #[serde(default)]
    pub category_slug: Option<String>,
    #[serde(default = "default_is_published")]
    pub category_is_published: bool,
}

#[derive(Deserialize, ToSchema, Default)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub category_title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category_description: Option<Option<String>>,
    #[serde(default)]
    pub category_slug: Option<String>,
    #[serde(default)]
    pub category_is_published: Option<bool>,
}

fn default_is_published() -> bool {
    true
}
