use utoipa::ToSchema;

use crate::domain::blog::{
    comment::{CommentForm, CommentView},
    post::PostCard,
};

#[derive(serde_derive::Serialize, ToSchema)]
pub struct ReadPostResponse {
    pub post: PostCard,
    pub comments: Vec<CommentView>,
    pub comment_form: CommentForm,
}
