use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    auth::viewer::Viewer,
    policy::{
        access::{AccessError, post_detail_path},
        visibility::{PostSnapshot, can_view},
    },
};

/// Content owned by exactly one user.
pub trait Authored {
    fn author_id(&self) -> Uuid;
}

/// Only the author may edit or delete; nobody else, anonymous included.
pub fn can_mutate<E: Authored + ?Sized>(entity: &E, viewer: &Viewer) -> bool {
    viewer.is(entity.author_id())
}

pub fn require_authenticated(viewer: &Viewer) -> Result<Uuid, AccessError> {
    viewer.user_id().ok_or(AccessError::AuthenticationRequired)
}

/// Returns the acting author on success.
pub fn authorize_post_mutation(
    post: &PostSnapshot,
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> Result<Uuid, AccessError> {
    authorize(post, post, viewer, now)
}

/// A comment is judged against its parent post: if the viewer cannot see
/// the post, the comment does not exist for them.
pub fn authorize_comment_mutation<C: Authored>(
    comment: &C,
    parent: &PostSnapshot,
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> Result<Uuid, AccessError> {
    authorize(comment, parent, viewer, now)
}

/// Any signed-in viewer may comment on a post they can see.
pub fn authorize_comment_creation(
    parent: &PostSnapshot,
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> Result<Uuid, AccessError> {
    let user_id = require_authenticated(viewer)?;
    if !can_view(parent, viewer, now) {
        return Err(AccessError::NotFound);
    }
    Ok(user_id)
}

fn authorize<E: Authored + ?Sized>(
    entity: &E,
    post: &PostSnapshot,
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> Result<Uuid, AccessError> {
    let user_id = require_authenticated(viewer)?;
    if can_mutate(entity, viewer) {
        return Ok(user_id);
    }
    if !can_view(post, viewer, now) {
        return Err(AccessError::NotFound);
    }
    Err(AccessError::Forbidden {
        redirect_to: post_detail_path(post.post_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    struct Note(Uuid);

    impl Authored for Note {
        fn author_id(&self) -> Uuid {
            self.0
        }
    }

    fn visible_post(author_id: Uuid, now: DateTime<Utc>) -> PostSnapshot {
        PostSnapshot {
            post_id: 7,
            author_id,
            is_published: true,
            pub_date: Some(now - Duration::days(1)),
            category_is_published: Some(true),
        }
    }

    fn hidden_post(author_id: Uuid) -> PostSnapshot {
        PostSnapshot {
            post_id: 8,
            author_id,
            is_published: false,
            pub_date: None,
            category_is_published: None,
        }
    }

    #[test]
    fn can_mutate_only_for_author() {
        let author = Uuid::new_v4();
        let note = Note(author);
        assert!(can_mutate(&note, &Viewer::Authenticated(author)));
        assert!(!can_mutate(&note, &Viewer::Authenticated(Uuid::new_v4())));
        assert!(!can_mutate(&note, &Viewer::Anonymous));
    }

    #[test]
    fn author_may_edit_own_hidden_post() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let result = authorize_post_mutation(&hidden_post(author), &Viewer::Authenticated(author), now);
        assert_eq!(result, Ok(author));
    }

    #[test]
    fn stranger_editing_visible_post_is_redirected_to_it() {
        let now = Utc::now();
        let post = visible_post(Uuid::new_v4(), now);
        let result = authorize_post_mutation(&post, &Viewer::Authenticated(Uuid::new_v4()), now);
        assert_eq!(
            result,
            Err(AccessError::Forbidden {
                redirect_to: "/api/posts/7".to_string()
            })
        );
    }

    #[test]
    fn stranger_editing_hidden_post_gets_not_found() {
        let now = Utc::now();
        let post = hidden_post(Uuid::new_v4());
        let result = authorize_post_mutation(&post, &Viewer::Authenticated(Uuid::new_v4()), now);
        assert_eq!(result, Err(AccessError::NotFound));
    }

    #[test]
    fn anonymous_is_asked_to_log_in_for_any_post() {
        let now = Utc::now();
        for post in [visible_post(Uuid::new_v4(), now), hidden_post(Uuid::new_v4())] {
            assert_eq!(
                authorize_post_mutation(&post, &Viewer::Anonymous, now),
                Err(AccessError::AuthenticationRequired)
            );
        }
    }

    #[test]
    fn comment_under_invisible_post_is_not_found() {
        let now = Utc::now();
        let comment = Note(Uuid::new_v4());
        let parent = hidden_post(Uuid::new_v4());
        let result =
            authorize_comment_mutation(&comment, &parent, &Viewer::Authenticated(Uuid::new_v4()), now);
        assert_eq!(result, Err(AccessError::NotFound));
    }

    #[test]
    fn comment_author_keeps_rights_on_visible_post() {
        let now = Utc::now();
        let commenter = Uuid::new_v4();
        let parent = visible_post(Uuid::new_v4(), now);
        let result =
            authorize_comment_mutation(&Note(commenter), &parent, &Viewer::Authenticated(commenter), now);
        assert_eq!(result, Ok(commenter));
    }

    #[test]
    fn post_author_cannot_edit_others_comments() {
        let now = Utc::now();
        let post_author = Uuid::new_v4();
        let parent = visible_post(post_author, now);
        let result = authorize_comment_mutation(
            &Note(Uuid::new_v4()),
            &parent,
            &Viewer::Authenticated(post_author),
            now,
        );
        assert!(matches!(result, Err(AccessError::Forbidden { .. })));
    }

    #[test]
    fn commenting_requires_login_and_visible_parent() {
        let now = Utc::now();
        let parent = visible_post(Uuid::new_v4(), now);
        assert_eq!(
            authorize_comment_creation(&parent, &Viewer::Anonymous, now),
            Err(AccessError::AuthenticationRequired)
        );

        let reader = Uuid::new_v4();
        assert_eq!(
            authorize_comment_creation(&parent, &Viewer::Authenticated(reader), now),
            Ok(reader)
        );
        assert_eq!(
            authorize_comment_creation(&hidden_post(Uuid::new_v4()), &Viewer::Authenticated(reader), now),
            Err(AccessError::NotFound)
        );
    }
}
