use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    auth::viewer::Viewer,
    blog::{category::Category, post::Post},
    policy::authorization::Authored,
};

/// The fields of a post (and its category) that decide visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostSnapshot {
    pub post_id: i64,
    pub author_id: Uuid,
    pub is_published: bool,
    pub pub_date: Option<DateTime<Utc>>,
    /// `None` when the post has no category.
    pub category_is_published: Option<bool>,
}

impl PostSnapshot {
    pub fn of(post: &Post, category: Option<&Category>) -> Self {
        Self {
            post_id: post.post_id,
            author_id: post.user_id,
            is_published: post.post_is_published,
            pub_date: post.post_pub_date,
            category_is_published: category.map(|c| c.category_is_published),
        }
    }
}

impl Authored for PostSnapshot {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

/// Published, due, and not filed under a hidden category.
pub fn is_publicly_visible(post: &PostSnapshot, now: DateTime<Utc>) -> bool {
    post.is_published
        && post.pub_date.is_none_or(|pub_date| pub_date <= now)
        && post.category_is_published.unwrap_or(true)
}

/// Authors always see their own posts, drafts and scheduled ones included.
pub fn can_view(post: &PostSnapshot, viewer: &Viewer, now: DateTime<Utc>) -> bool {
    viewer.is(post.author_id) || is_publicly_visible(post, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn snapshot(
        is_published: bool,
        pub_date: Option<DateTime<Utc>>,
        category_is_published: Option<bool>,
    ) -> PostSnapshot {
        PostSnapshot {
            post_id: 1,
            author_id: Uuid::new_v4(),
            is_published,
            pub_date,
            category_is_published,
        }
    }

    fn all_states(now: DateTime<Utc>) -> Vec<PostSnapshot> {
        let dates = [
            None,
            Some(now - Duration::days(1)),
            Some(now),
            Some(now + Duration::days(1)),
        ];
        let categories = [None, Some(true), Some(false)];
        let mut out = Vec::new();
        for is_published in [true, false] {
            for pub_date in dates {
                for category in categories {
                    out.push(snapshot(is_published, pub_date, category));
                }
            }
        }
        out
    }

    #[test]
    fn unpublished_posts_are_never_public() {
        let now = Utc::now();
        for post in all_states(now).iter().filter(|p| !p.is_published) {
            assert!(!is_publicly_visible(post, now), "{post:?}");
        }
    }

    #[test]
    fn future_pub_date_hides_published_post() {
        let now = Utc::now();
        let post = snapshot(true, Some(now + Duration::minutes(1)), Some(true));
        assert!(!is_publicly_visible(&post, now));
    }

    #[test]
    fn pub_date_equal_to_now_is_due() {
        let now = Utc::now();
        assert!(is_publicly_visible(&snapshot(true, Some(now), None), now));
    }

    #[test]
    fn missing_pub_date_does_not_hide() {
        let now = Utc::now();
        assert!(is_publicly_visible(&snapshot(true, None, None), now));
    }

    #[test]
    fn missing_category_never_hides() {
        let now = Utc::now();
        for post in all_states(now)
            .into_iter()
            .filter(|p| p.category_is_published.is_none())
        {
            let with_published_category = PostSnapshot {
                category_is_published: Some(true),
                ..post
            };
            assert_eq!(
                is_publicly_visible(&post, now),
                is_publicly_visible(&with_published_category, now)
            );
        }
    }

    #[test]
    fn unpublished_category_hides_due_post() {
        let now = Utc::now();
        let post = snapshot(true, Some(now - Duration::days(1)), Some(false));
        assert!(!is_publicly_visible(&post, now));
    }

    #[test]
    fn author_sees_every_state() {
        let now = Utc::now();
        for post in all_states(now) {
            let author = Viewer::Authenticated(post.author_id);
            assert!(can_view(&post, &author, now), "{post:?}");
        }
    }

    #[test]
    fn others_see_only_public_posts() {
        let now = Utc::now();
        let stranger = Viewer::Authenticated(Uuid::new_v4());
        for post in all_states(now) {
            assert_eq!(can_view(&post, &stranger, now), is_publicly_visible(&post, now));
            assert_eq!(
                can_view(&post, &Viewer::Anonymous, now),
                is_publicly_visible(&post, now)
            );
        }
    }
}
