use std::collections::HashMap;

use chrono::{DateTime, Utc};
use diesel::{
    dsl::{IntoBoxed, LeftJoin, count},
    pg::Pg,
    prelude::*,
};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde_derive::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        auth::{
            user::{User, UserBadge, UserProfile},
            viewer::Viewer,
        },
        blog::{
            category::{Category, CategoryBadge},
            location::Location,
            post::{Post, PostCard},
        },
        feed::filter::{FeedFilter, FeedScope},
        policy::access::AccessError,
    },
    errors::code_error::{CodeError, CodeErrorResp, code_err},
    schema::{categories, comments, locations, posts, users},
    util::pagination::{POSTS_PER_PAGE, PageInfo},
};

type FeedSource = LeftJoin<posts::table, categories::table>;
type FeedQuery<'a> = IntoBoxed<'a, FeedSource, Pg>;

/// What a listing is about, echoed back alongside its posts.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedSubject {
    Global,
    Author { profile: UserProfile },
    Category { category: Category },
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct FeedPage {
    pub subject: FeedSubject,
    pub posts: Vec<PostCard>,
    pub page: PageInfo,
}

fn feed_query<'a>(filter: &FeedFilter) -> FeedQuery<'a> {
    let mut query = posts::table.left_join(categories::table).into_boxed();

    if let Some(author_id) = filter.author_id {
        query = query.filter(posts::user_id.eq(author_id));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(posts::category_id.eq(category_id));
    }
    if filter.public_only {
        query = query
            .filter(posts::post_is_published.eq(true))
            .filter(
                posts::post_pub_date
                    .is_null()
                    .or(posts::post_pub_date.le(filter.now)),
            )
            .filter(
                posts::category_id
                    .is_null()
                    .or(categories::category_is_published.eq(true)),
            );
    }

    query
}

/// Newest `pub_date` first, undated posts last, then newest id first.
fn ordered_feed_query<'a>(filter: &FeedFilter) -> FeedQuery<'a> {
    feed_query(filter).order((
        posts::post_pub_date.desc().nulls_last(),
        posts::post_id.desc(),
    ))
}

async fn resolve_scope(
    conn: &mut AsyncPgConnection,
    scope: &FeedScope,
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> Result<(FeedSubject, FeedFilter), CodeErrorResp> {
    match scope {
        FeedScope::Global => Ok((FeedSubject::Global, FeedFilter::global(now))),
        FeedScope::Author(user_name) => {
            let user = User::find_by_name(conn, user_name)
                .await?
                .ok_or(AccessError::NotFound)?;
            let filter = FeedFilter::author(user.user_id, viewer, now);
            Ok((
                FeedSubject::Author {
                    profile: user.into(),
                },
                filter,
            ))
        }
        FeedScope::Category(slug) => {
            let category: Category = categories::table
                .filter(categories::category_slug.eq(slug))
                .select(Category::as_select())
                .first(conn)
                .await
                .optional()
                .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
                .ok_or(AccessError::NotFound)?;
            let filter = FeedFilter::category(&category, now)?;
            Ok((FeedSubject::Category { category }, filter))
        }
    }
}

/// One page of a feed, newest first, each post annotated with its comment
/// count. Unknown authors and unknown or hidden categories are NotFound.
pub async fn list_posts(
    conn: &mut AsyncPgConnection,
    scope: &FeedScope,
    viewer: &Viewer,
    requested_page: Option<&str>,
    now: DateTime<Utc>,
) -> Result<FeedPage, CodeErrorResp> {
    let (subject, filter) = resolve_scope(conn, scope, viewer, now).await?;

    let total_count: i64 = feed_query(&filter)
        .count()
        .get_result(conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    let page = PageInfo::resolve(requested_page, total_count, POSTS_PER_PAGE);

    let rows: Vec<(Post, Option<Category>)> = ordered_feed_query(&filter)
        .select((Post::as_select(), categories::all_columns.nullable()))
        .offset(page.offset())
        .limit(page.limit())
        .load(conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    let posts = assemble_cards(conn, rows).await?;

    Ok(FeedPage {
        subject,
        posts,
        page,
    })
}

/// Attaches author names, published locations and comment counts, keeping
/// the order of `rows`.
pub async fn assemble_cards(
    conn: &mut AsyncPgConnection,
    rows: Vec<(Post, Option<Category>)>,
) -> Result<Vec<PostCard>, CodeErrorResp> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let post_ids: Vec<i64> = rows.iter().map(|(post, _)| post.post_id).collect();

    let mut user_ids: Vec<Uuid> = rows.iter().map(|(post, _)| post.user_id).collect();
    user_ids.sort();
    user_ids.dedup();

    let mut location_ids: Vec<i64> = rows
        .iter()
        .filter_map(|(post, _)| post.location_id)
        .collect();
    location_ids.sort();
    location_ids.dedup();

    let author_map: HashMap<Uuid, String> = users::table
        .filter(users::user_id.eq_any(&user_ids))
        .select((users::user_id, users::user_name))
        .load::<(Uuid, String)>(conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
        .into_iter()
        .collect();

    let location_map: HashMap<i64, Location> = if location_ids.is_empty() {
        HashMap::new()
    } else {
        locations::table
            .filter(locations::location_id.eq_any(&location_ids))
            .select(Location::as_select())
            .load::<Location>(conn)
            .await
            .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
            .into_iter()
            .map(|location| (location.location_id, location))
            .collect()
    };

    let comment_count_map: HashMap<i64, i64> = comments::table
        .filter(comments::post_id.eq_any(&post_ids))
        .group_by(comments::post_id)
        .select((comments::post_id, count(comments::comment_id)))
        .load::<(i64, i64)>(conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
        .into_iter()
        .collect();

    Ok(rows
        .into_iter()
        .map(|(post, category)| PostCard {
            author: UserBadge {
                user_id: post.user_id,
                user_name: author_map
                    .get(&post.user_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
            },
            category: category.as_ref().map(CategoryBadge::from),
            location: post
                .location_id
                .and_then(|id| location_map.get(&id))
                .and_then(Location::badge),
            comment_count: comment_count_map.get(&post.post_id).copied().unwrap_or(0),
            post_id: post.post_id,
            post_title: post.post_title,
            post_text: post.post_text,
            post_pub_date: post.post_pub_date,
            post_image: post.post_image,
            post_is_published: post.post_is_published,
            post_created_at: post.post_created_at,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use diesel::debug_query;

    use super::*;

    const PUBLISHED: &str = r#""posts"."post_is_published" = $"#;
    const DUE: &str = r#""posts"."post_pub_date" IS NULL OR "posts"."post_pub_date" <= $"#;
    const CATEGORY_SHOWN: &str =
        r#""posts"."category_id" IS NULL OR "categories"."category_is_published" = $"#;
    // `= $` keeps the join's ON clause from matching
    const BY_AUTHOR: &str = r#""posts"."user_id" = $"#;
    const IN_CATEGORY: &str = r#""posts"."category_id" = $"#;
    const ORDER: &str =
        r#"ORDER BY "posts"."post_pub_date" DESC NULLS LAST, "posts"."post_id" DESC"#;

    fn sql(filter: &FeedFilter) -> String {
        debug_query::<Pg, _>(&ordered_feed_query(filter)).to_string()
    }

    fn assert_public_clauses(sql: &str) {
        for clause in [PUBLISHED, DUE, CATEGORY_SHOWN] {
            assert!(sql.contains(clause), "missing {clause} in {sql}");
        }
    }

    #[test]
    fn global_feed_renders_public_rule_only() {
        let sql = sql(&FeedFilter::global(Utc::now()));
        assert!(sql.contains("LEFT OUTER JOIN"), "{sql}");
        assert_public_clauses(&sql);
        assert!(!sql.contains(BY_AUTHOR), "{sql}");
        assert!(!sql.contains(IN_CATEGORY), "{sql}");
        assert!(sql.contains(ORDER), "{sql}");
    }

    #[test]
    fn public_author_feed_adds_author_to_public_rule() {
        let filter = FeedFilter::author(Uuid::nil(), &Viewer::Anonymous, Utc::now());
        let sql = sql(&filter);
        assert!(sql.contains(BY_AUTHOR), "{sql}");
        assert_public_clauses(&sql);
        assert!(sql.contains(ORDER), "{sql}");
    }

    #[test]
    fn own_profile_renders_no_visibility_clauses() {
        let author = Uuid::new_v4();
        let filter = FeedFilter::author(author, &Viewer::Authenticated(author), Utc::now());
        let sql = sql(&filter);
        assert!(sql.contains(BY_AUTHOR), "{sql}");
        for clause in [PUBLISHED, DUE, CATEGORY_SHOWN] {
            assert!(!sql.contains(clause), "unexpected {clause} in {sql}");
        }
        assert!(sql.contains(ORDER), "{sql}");
    }

    #[test]
    fn category_feed_scopes_public_rule_to_category() {
        let category = Category {
            category_id: 7,
            category_title: "News".to_string(),
            category_description: None,
            category_slug: "news".to_string(),
            category_is_published: true,
            category_created_at: Utc::now(),
        };
        let filter = FeedFilter::category(&category, Utc::now()).unwrap();
        let sql = sql(&filter);
        assert!(sql.contains(IN_CATEGORY), "{sql}");
        assert_public_clauses(&sql);
        assert!(!sql.contains(BY_AUTHOR), "{sql}");
        assert!(sql.contains(ORDER), "{sql}");
    }

    #[test]
    fn binds_carry_filter_values() {
        let author = Uuid::new_v4();
        let filter = FeedFilter::author(author, &Viewer::Anonymous, Utc::now());
        let sql = sql(&filter);
        assert!(sql.contains(&author.to_string()), "{sql}");
    }
}
