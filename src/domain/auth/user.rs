use chrono::{DateTime, Utc};
use diesel::{
    AsChangeset, ExpressionMethods, Insertable, OptionalExtension, QueryDsl, Queryable,
    Selectable, SelectableHelper,
};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde_derive::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    errors::code_error::{CodeError, CodeErrorResp, code_err},
    schema::users,
};

#[derive(Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub user_first_name: String,
    pub user_last_name: String,
    pub user_password_hash: String,
    pub user_is_superuser: bool,
    pub user_created_at: DateTime<Utc>,
    pub user_updated_at: DateTime<Utc>,
}

/// Public face of a user; never carries the password hash.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub user_name: String,
    pub user_first_name: String,
    pub user_last_name: String,
    pub user_created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name,
            user_first_name: user.user_first_name,
            user_last_name: user.user_last_name,
            user_created_at: user.user_created_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct UserBadge {
    pub user_id: Uuid,
    pub user_name: String,
}

impl User {
    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<Option<User>, CodeErrorResp> {
        users::table
            .filter(users::user_id.eq(user_id))
            .select(User::as_select())
            .first::<User>(conn)
            .await
            .optional()
            .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))
    }

    pub async fn find_by_name(
        conn: &mut AsyncPgConnection,
        user_name: &str,
    ) -> Result<Option<User>, CodeErrorResp> {
        users::table
            .filter(users::user_name.eq(user_name))
            .select(User::as_select())
            .first::<User>(conn)
            .await
            .optional()
            .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))
    }

    pub async fn insert_one(
        conn: &mut AsyncPgConnection,
        new_user: UserInsertable<'_>,
    ) -> Result<User, CodeErrorResp> {
        diesel::insert_into(users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result::<User>(conn)
            .await
            .map_err(map_unique_violation(CodeError::DB_INSERTION_ERROR))
    }
}

/// Translates unique-constraint failures on `users` into 409s, naming the
/// offending column.
pub fn map_unique_violation(
    fallback: CodeError,
) -> impl FnOnce(diesel::result::Error) -> CodeErrorResp {
    move |e| match e {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            ref info,
        ) => {
            if info.constraint_name().is_some_and(|c| c.contains("email")) {
                code_err(CodeError::EMAIL_MUST_BE_UNIQUE, &e)
            } else {
                code_err(CodeError::USER_NAME_MUST_BE_UNIQUE, &e)
            }
        }
        _ => code_err(fallback, e),
    }
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct UserInsertable<'nu> {
    user_name: &'nu str,
    user_email: &'nu str,
    user_first_name: &'nu str,
    user_last_name: &'nu str,
    user_password_hash: &'nu str,
}

impl<'nu> UserInsertable<'nu> {
    pub fn new(
        user_name: &'nu str,
        user_email: &'nu str,
        user_first_name: &'nu str,
        user_last_name: &'nu str,
        user_password_hash: &'nu str,
    ) -> Self {
        Self {
            user_name,
            user_email,
            user_first_name,
            user_last_name,
            user_password_hash,
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = users)]
pub struct UserProfileChangeset<'a> {
    pub user_name: Option<&'a str>,
    pub user_email: Option<&'a str>,
    pub user_first_name: Option<&'a str>,
    pub user_last_name: Option<&'a str>,
    pub user_updated_at: DateTime<Utc>,
}
