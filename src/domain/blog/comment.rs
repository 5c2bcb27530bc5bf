use chrono::{DateTime, Utc};
use diesel::{
    ExpressionMethods, Insertable, OptionalExtension, QueryDsl, Queryable, Selectable,
    SelectableHelper,
};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde_derive::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{auth::user::UserBadge, policy::authorization::Authored},
    errors::code_error::{CodeError, CodeErrorResp, code_err},
    schema::{comments, users},
};

#[derive(Clone, Debug, Serialize, Queryable, Selectable, ToSchema)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub comment_id: i64,
    pub comment_text: String,
    pub post_id: i64,
    pub user_id: Uuid,
    pub comment_created_at: DateTime<Utc>,
}

impl Authored for Comment {
    fn author_id(&self) -> Uuid {
        self.user_id
    }
}

impl Comment {
    /// Looks a comment up under its parent post; a comment filed under a
    /// different post does not resolve.
    pub async fn find_under_post(
        conn: &mut AsyncPgConnection,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Option<Comment>, CodeErrorResp> {
        comments::table
            .filter(comments::post_id.eq(post_id))
            .filter(comments::comment_id.eq(comment_id))
            .select(Comment::as_select())
            .first::<Comment>(conn)
            .await
            .optional()
            .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))
    }

    /// Thread of a post, oldest first.
    pub async fn thread(
        conn: &mut AsyncPgConnection,
        post_id: i64,
    ) -> Result<Vec<CommentView>, CodeErrorResp> {
        let rows: Vec<(Comment, String)> = comments::table
            .inner_join(users::table)
            .filter(comments::post_id.eq(post_id))
            .order((
                comments::comment_created_at.asc(),
                comments::comment_id.asc(),
            ))
            .select((Comment::as_select(), users::user_name))
            .load(conn)
            .await
            .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

        Ok(rows
            .into_iter()
            .map(|(comment, user_name)| CommentView::new(comment, user_name))
            .collect())
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct CommentView {
    pub comment_id: i64,
    pub post_id: i64,
    pub comment_text: String,
    pub comment_created_at: DateTime<Utc>,
    pub author: UserBadge,
}

impl CommentView {
    pub fn new(comment: Comment, user_name: String) -> Self {
        Self {
            comment_id: comment.comment_id,
            post_id: comment.post_id,
            comment_text: comment.comment_text,
            comment_created_at: comment.comment_created_at,
            author: UserBadge {
                user_id: comment.user_id,
                user_name,
            },
        }
    }
}

/// Blank composition form attached to a rendered post.
#[derive(Clone, Debug, Default, Serialize, ToSchema)]
pub struct CommentForm {
    pub comment_text: String,
}

#[derive(Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment<'a> {
    pub comment_text: &'a str,
    pub post_id: i64,
    pub user_id: Uuid,
}
