use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{auth::viewer::Viewer, blog::category::Category, policy::access::AccessError};

/// Which listing is being requested. Path segments arrive as opaque strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedScope {
    Global,
    Author(String),
    Category(String),
}

/// Predicate a listing applies to posts; `assembler::feed_query` renders it
/// as SQL. `public_only` stands for the whole public-visibility rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedFilter {
    pub public_only: bool,
    pub author_id: Option<Uuid>,
    pub category_id: Option<i64>,
    pub now: DateTime<Utc>,
}

impl FeedFilter {
    pub fn global(now: DateTime<Utc>) -> Self {
        Self {
            public_only: true,
            author_id: None,
            category_id: None,
            now,
        }
    }

    /// An author looking at their own profile sees every post they wrote.
    pub fn author(author_id: Uuid, viewer: &Viewer, now: DateTime<Utc>) -> Self {
        Self {
            public_only: !viewer.is(author_id),
            author_id: Some(author_id),
            category_id: None,
            now,
        }
    }

    /// Hidden categories have no listing at all, whoever asks.
    pub fn category(category: &Category, now: DateTime<Utc>) -> Result<Self, AccessError> {
        if !category.category_is_published {
            return Err(AccessError::NotFound);
        }
        Ok(Self {
            public_only: true,
            author_id: None,
            category_id: Some(category.category_id),
            now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(is_published: bool) -> Category {
        Category {
            category_id: 7,
            category_title: "News".to_string(),
            category_description: None,
            category_slug: "news".to_string(),
            category_is_published: is_published,
            category_created_at: Utc::now(),
        }
    }

    #[test]
    fn global_feed_is_public_and_unscoped() {
        let now = Utc::now();
        let filter = FeedFilter::global(now);
        assert!(filter.public_only);
        assert_eq!(filter.author_id, None);
        assert_eq!(filter.category_id, None);
        assert_eq!(filter.now, now);
    }

    #[test]
    fn own_profile_drops_public_only() {
        let author = Uuid::new_v4();
        let filter = FeedFilter::author(author, &Viewer::Authenticated(author), Utc::now());
        assert!(!filter.public_only);
        assert_eq!(filter.author_id, Some(author));
    }

    #[test]
    fn strangers_see_public_author_feed() {
        let author = Uuid::new_v4();
        let now = Utc::now();
        for viewer in [Viewer::Anonymous, Viewer::Authenticated(Uuid::new_v4())] {
            let filter = FeedFilter::author(author, &viewer, now);
            assert!(filter.public_only, "{viewer:?}");
            assert_eq!(filter.author_id, Some(author));
        }
    }

    #[test]
    fn published_category_scopes_public_feed() {
        let filter = FeedFilter::category(&category(true), Utc::now()).unwrap();
        assert!(filter.public_only);
        assert_eq!(filter.category_id, Some(7));
        assert_eq!(filter.author_id, None);
    }

    #[test]
    fn hidden_category_feed_is_not_found() {
        assert_eq!(
            FeedFilter::category(&category(false), Utc::now()),
            Err(AccessError::NotFound)
        );
    }
}
