use crate::{
    app_lib::ids,
    features::shared::{null_as_default, push_filter, Author},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "PUBLISHED")]
    Published,
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Published => f.write_str("published"),
        }
    }
}

/// A user-authored travel itinerary. The console never edits these fields; it
/// only issues approve, reject and delete commands.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(deserialize_with = "ids::deserialize")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: Author,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub cities: Vec<String>,
    /// Length in days.
    #[serde(default)]
    pub duration: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub preview_image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub status: Option<RouteStatus>,
}

/// Which collection the routes view lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RouteTab {
    #[default]
    All,
    Pending,
}

impl RouteTab {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::All => "/routes",
            Self::Pending => "/routes/pending",
        }
    }
}

impl fmt::Display for RouteTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Pending => f.write_str("pending"),
        }
    }
}

/// Route list filters; blank values are left out of the query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteFilters {
    pub search: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub min_rating: Option<String>,
    pub max_duration: Option<String>,
}

impl RouteFilters {
    pub fn append_to(&self, query: &mut Vec<(&'static str, String)>) {
        push_filter(query, "search", self.search.as_deref());
        push_filter(query, "country", self.country.as_deref());
        push_filter(query, "city", self.city.as_deref());
        push_filter(query, "minRating", self.min_rating.as_deref());
        push_filter(query, "maxDuration", self.max_duration.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn route_decodes_library_payload() {
        let route: Route = serde_json::from_value(json!({
            "id": 42,
            "title": "Karelia in a week",
            "description": "Lakes and forests",
            "author": { "id": 7, "username": "olga", "avatarUrl": null },
            "countries": ["Russia"],
            "cities": ["Petrozavodsk", "Sortavala"],
            "duration": 7,
            "rating": 4.5,
            "reviewsCount": 12,
            "previewImageUrl": "https://cdn.example/karelia.jpg",
            "tags": ["nature"],
            "createdAt": "2024-05-01T10:00:00Z",
            "status": "PENDING"
        }))
        .unwrap();

        assert_eq!(route.id, "42");
        assert_eq!(route.author.id, "7");
        assert_eq!(route.author.avatar_url, None);
        assert_eq!(route.cities.len(), 2);
        assert_eq!(route.reviews_count, 12);
        assert_eq!(route.status, Some(RouteStatus::Pending));
    }

    #[test]
    fn route_tolerates_sparse_payload() {
        let route: Route = serde_json::from_value(json!({
            "id": "r-1",
            "title": "Untitled",
            "author": { "id": "u-1", "username": "anon" }
        }))
        .unwrap();
        assert!(route.tags.is_empty());
        assert_eq!(route.duration, 0);
        assert_eq!(route.status, None);
    }

    #[test]
    fn route_with_null_author_and_rating_still_decodes() {
        let route: Route = serde_json::from_value(json!({
            "id": 8,
            "title": "Orphaned",
            "author": null,
            "rating": null
        }))
        .unwrap();
        assert_eq!(route.author.username, "unknown");
        assert!(route.rating.abs() < f64::EPSILON);
    }

    #[test]
    fn filters_use_wire_names_and_skip_blanks() {
        let filters = RouteFilters {
            search: Some(String::new()),
            country: Some("Russia".to_string()),
            city: None,
            min_rating: Some("4".to_string()),
            max_duration: Some("10".to_string()),
        };
        let mut query = Vec::new();
        filters.append_to(&mut query);
        assert_eq!(
            query,
            vec![
                ("country", "Russia".to_string()),
                ("minRating", "4".to_string()),
                ("maxDuration", "10".to_string()),
            ]
        );
    }

    #[test]
    fn tabs_select_collection() {
        assert_eq!(RouteTab::All.path(), "/routes");
        assert_eq!(RouteTab::Pending.path(), "/routes/pending");
        assert_eq!(RouteTab::default(), RouteTab::All);
    }
}
