use chrono::{DateTime, Utc};
use serde_derive::Deserialize;
use utoipa::ToSchema;

use crate::{domain::blog::post::PostChangeset, dto::common::double_option::double_option};

/// Absent fields are left untouched; `null` clears a nullable column.
#[derive(Deserialize, ToSchema, Default)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub post_title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub post_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub post_pub_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub location_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub post_image: Option<Option<String>>,
    #[serde(default)]
    pub post_is_published: Option<bool>,
}

impl UpdatePostRequest {
    pub fn as_changeset(&self) -> PostChangeset<'_> {
        PostChangeset {
            post_title: self.post_title.as_deref(),
            post_text: self.post_text.as_ref().map(|text| text.as_deref()),
            post_pub_date: self.post_pub_date,
            location_id: self.location_id,
            category_id: self.category_id,
            post_image: self.post_image.as_ref().map(|image| image.as_deref()),
            post_is_published: self.post_is_published,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_empty_changeset() {
        let request: UpdatePostRequest = serde_json::from_str("{}").unwrap();
        assert!(request.as_changeset().is_empty());
    }

    #[test]
    fn null_clears_category() {
        let request: UpdatePostRequest =
            serde_json::from_str(r#"{"category_id": null, "post_title": "New"}"#).unwrap();
        let changeset = request.as_changeset();
        assert_eq!(changeset.category_id, Some(None));
        assert_eq!(changeset.post_title, Some("New"));
        assert_eq!(changeset.location_id, None);
    }
}
