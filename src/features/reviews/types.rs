use crate::{
    app_lib::ids,
    features::shared::{null_as_default, push_filter, Author},
};
use serde::{Deserialize, Serialize};

/// Replaces a review's comment after moderation.
pub const REDACTED_COMMENT: &str = "[Comment removed by moderator]";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(deserialize_with = "ids::deserialize")]
    pub id: String,
    #[serde(deserialize_with = "ids::deserialize")]
    pub route_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: Author,
    /// 1 to 5; some clients submit half stars.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Review {
    /// Local mirror of a successful redaction: the comment goes, id and rating stay.
    pub fn redact(&mut self) {
        REDACTED_COMMENT.clone_into(&mut self.comment);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewFilters {
    pub route_id: Option<String>,
    pub min_rating: Option<String>,
    pub max_rating: Option<String>,
    pub search: Option<String>,
}

impl ReviewFilters {
    pub fn append_to(&self, query: &mut Vec<(&'static str, String)>) {
        push_filter(query, "routeId", self.route_id.as_deref());
        push_filter(query, "minRating", self.min_rating.as_deref());
        push_filter(query, "maxRating", self.max_rating.as_deref());
        push_filter(query, "search", self.search.as_deref());
    }
}
