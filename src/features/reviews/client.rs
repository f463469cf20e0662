//! Client helpers for review moderation against the library service.

use crate::{
    app_lib::{ids, AppError, Gateway, Service},
    features::{
        reviews::types::{Review, ReviewFilters},
        shared::{page_query, Page},
    },
};
use tracing::instrument;

/// Fetches one page (1-based) of reviews across all routes.
#[instrument(skip(gateway))]
pub async fn list_reviews(
    gateway: &Gateway<'_>,
    page: u32,
    size: u32,
    filters: &ReviewFilters,
) -> Result<Page<Review>, AppError> {
    let mut query = page_query(page, size);
    filters.append_to(&mut query);
    gateway
        .get_json(Service::Library, "/admin/reviews", &query)
        .await
}

/// Removes a review entirely.
#[instrument(skip(gateway))]
pub async fn delete_review(gateway: &Gateway<'_>, id: &str) -> Result<(), AppError> {
    let id = require_id(id)?;
    gateway
        .delete_empty(Service::Library, &format!("/routes/{id}/reviews"))
        .await
}

/// Clears the comment of a review; the rating stays.
#[instrument(skip(gateway))]
pub async fn redact_review_comment(gateway: &Gateway<'_>, id: &str) -> Result<(), AppError> {
    let id = require_id(id)?;
    gateway
        .delete_empty(Service::Library, &format!("/admin/reviews/{id}/comment"))
        .await
}

fn require_id(id: &str) -> Result<&str, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::Config("Review id is required.".to_string()));
    }
    ids::normalize(id).ok_or_else(|| AppError::Config(format!("Invalid review id: {}", id.trim())))
}
