use chrono::{DateTime, Utc};
use diesel::{
    AsChangeset, ExpressionMethods, Insertable, NullableExpressionMethods, OptionalExtension,
    QueryDsl, Queryable, Selectable, SelectableHelper,
};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde_derive::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        auth::user::UserBadge,
        blog::{
            category::{Category, CategoryBadge},
            location::LocationBadge,
        },
    },
    errors::code_error::{CodeError, CodeErrorResp, code_err},
    schema::{categories, posts},
};

#[derive(Clone, Debug, Serialize, Queryable, Selectable, ToSchema)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    pub post_id: i64,
    pub post_title: String,
    pub post_text: Option<String>,
    pub post_pub_date: Option<DateTime<Utc>>,
    pub user_id: Uuid,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    pub post_image: Option<String>,
    pub post_is_published: bool,
    pub post_created_at: DateTime<Utc>,
}

impl Post {
    /// Loads a post together with its category, if it has one.
    pub async fn find_with_category(
        conn: &mut AsyncPgConnection,
        post_id: i64,
    ) -> Result<Option<(Post, Option<Category>)>, CodeErrorResp> {
        posts::table
            .left_join(categories::table)
            .filter(posts::post_id.eq(post_id))
            .select((Post::as_select(), categories::all_columns.nullable()))
            .first::<(Post, Option<Category>)>(conn)
            .await
            .optional()
            .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))
    }
}

/// Foreign-key failures mean the request named a category or location that
/// does not exist.
pub fn map_reference_violation(
    fallback: CodeError,
) -> impl FnOnce(diesel::result::Error) -> CodeErrorResp {
    move |e| match e {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _,
        ) => code_err(CodeError::INVALID_REFERENCE, e),
        _ => code_err(fallback, e),
    }
}

/// A post as it appears in feeds and on its detail page.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct PostCard {
    pub post_id: i64,
    pub post_title: String,
    pub post_text: Option<String>,
    pub post_pub_date: Option<DateTime<Utc>>,
    pub post_image: Option<String>,
    pub post_is_published: bool,
    pub post_created_at: DateTime<Utc>,
    pub author: UserBadge,
    pub category: Option<CategoryBadge>,
    pub location: Option<LocationBadge>,
    pub comment_count: i64,
}

#[derive(Insertable)]
#[diesel(table_name = posts)]
pub struct NewPost<'a> {
    pub post_title: &'a str,
    pub post_text: Option<&'a str>,
    pub post_pub_date: Option<DateTime<Utc>>,
    pub user_id: Uuid,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    pub post_image: Option<&'a str>,
    pub post_is_published: bool,
}

// No user_id: authorship never changes.
#[derive(AsChangeset, Default)]
#[diesel(table_name = posts)]
pub struct PostChangeset<'a> {
    pub post_title: Option<&'a str>,
    pub post_text: Option<Option<&'a str>>,
    pub post_pub_date: Option<Option<DateTime<Utc>>>,
    pub location_id: Option<Option<i64>>,
    pub category_id: Option<Option<i64>>,
    pub post_image: Option<Option<&'a str>>,
    pub post_is_published: Option<bool>,
}

impl PostChangeset<'_> {
    pub fn is_empty(&self) -> bool {
        self.post_title.is_none()
            && self.post_text.is_none()
            && self.post_pub_date.is_none()
            && self.location_id.is_none()
            && self.category_id.is_none()
            && self.post_image.is_none()
            && self.post_is_published.is_none()
    }
}
