use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::{
    errors::code_error::{CodeError, CodeErrorResp, code_err},
    schema::categories,
};

#[derive(Clone, Debug, Serialize, Queryable, Selectable, ToSchema)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub category_id: i64,
    pub category_title: String,
    pub category_description: Option<String>,
    pub category_slug: String,
    pub category_is_published: bool,
    pub category_created_at: DateTime<Utc>,
}

/// What a post card shows about its category.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct CategoryBadge {
    pub category_id: i64,
    pub category_title: String,
    pub category_slug: String,
}

impl From<&Category> for CategoryBadge {
    fn from(category: &Category) -> Self {
        Self {
            category_id: category.category_id,
            category_title: category.category_title.clone(),
            category_slug: category.category_slug.clone(),
        }
    }
}

pub fn map_slug_violation(
    fallback: CodeError,
) -> impl FnOnce(diesel::result::Error) -> CodeErrorResp {
    move |e| match e {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        ) => code_err(CodeError::SLUG_MUST_BE_UNIQUE, e),
        _ => code_err(fallback, e),
    }
}

#[derive(Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategory<'a> {
    pub category_title: &'a str,
    pub category_description: Option<&'a str>,
    pub category_slug: &'a str,
    pub category_is_published: bool,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = categories)]
pub struct CategoryChangeset<'a> {
    pub category_title: Option<&'a str>,
    pub category_description: Option<Option<&'a str>>,
    pub category_slug: Option<&'a str>,
    pub category_is_published: Option<bool>,
}

impl CategoryChangeset<'_> {
    pub fn is_empty(&self) -> bool {
        self.category_title.is_none()
            && self.category_description.is_none()
            && self.category_slug.is_none()
            && self.category_is_published.is_none()
    }
}
