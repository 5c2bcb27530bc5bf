use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::schema::locations;

#[derive(Clone, Debug, Serialize, Queryable, Selectable, ToSchema)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Location {
    pub location_id: i64,
    pub location_name: String,
    pub location_is_published: bool,
    pub location_created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct LocationBadge {
    pub location_id: i64,
    pub location_name: String,
}

impl Location {
    /// Unpublished locations are withheld from responses; the post stays visible.
    pub fn badge(&self) -> Option<LocationBadge> {
        self.location_is_published.then(|| LocationBadge {
            location_id: self.location_id,
            location_name: self.location_name.clone(),
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = locations)]
pub struct NewLocation<'a> {
    pub location_name: &'a str,
    pub location_is_published: bool,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = locations)]
pub struct LocationChangeset<'a> {
    pub location_name: Option<&'a str>,
    pub location_is_published: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(is_published: bool) -> Location {
        Location {
            location_id: 3,
            location_name: "Vladivostok".to_string(),
            location_is_published: is_published,
            location_created_at: Utc::now(),
        }
    }

    #[test]
    fn published_location_has_badge() {
        let badge = location(true).badge().unwrap();
        assert_eq!(badge.location_id, 3);
        assert_eq!(badge.location_name, "Vladivostok");
    }

    #[test]
    fn unpublished_location_is_withheld() {
        assert!(location(false).badge().is_none());
    }
}
