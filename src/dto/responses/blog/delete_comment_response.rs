use serde_derive::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct DeleteCommentResponse {
    pub post_id: i64,
    pub deleted_comment_id: i64,
}
