//! Client helpers for route moderation. Listing and approve/reject go to the
//! library service; hard deletion goes to the planner service, which owns the
//! itinerary data. The backends enforce authorization.

use crate::{
    app_lib::{ids, AppError, Gateway, Service},
    features::{
        routes::types::{Route, RouteFilters, RouteTab},
        shared::{page_query, Page},
    },
};
use tracing::instrument;

/// Fetches one page (1-based) of routes from the selected tab.
#[instrument(skip(gateway))]
pub async fn list_routes(
    gateway: &Gateway<'_>,
    tab: RouteTab,
    page: u32,
    size: u32,
    filters: &RouteFilters,
) -> Result<Page<Route>, AppError> {
    let mut query = page_query(page, size);
    filters.append_to(&mut query);
    gateway
        .get_json(Service::Library, tab.path(), &query)
        .await
}

/// Publishes a pending route.
#[instrument(skip(gateway))]
pub async fn approve_route(gateway: &Gateway<'_>, id: &str) -> Result<(), AppError> {
    let id = require_id(id)?;
    gateway
        .put_empty(Service::Library, &format!("/routes/approve/{id}"))
        .await
}

/// Rejects a pending route; the library service drops the submission.
#[instrument(skip(gateway))]
pub async fn reject_route(gateway: &Gateway<'_>, id: &str) -> Result<(), AppError> {
    let id = require_id(id)?;
    gateway
        .delete_empty(Service::Library, &format!("/routes/{id}"))
        .await
}

/// Deletes a route outright through the planner service.
#[instrument(skip(gateway))]
pub async fn delete_route(gateway: &Gateway<'_>, id: &str) -> Result<(), AppError> {
    let id = require_id(id)?;
    gateway
        .delete_empty(Service::Planner, &format!("/routes/{id}"))
        .await
}

fn require_id(id: &str) -> Result<&str, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::Config("Route id is required.".to_string()));
    }
    ids::normalize(id).ok_or_else(|| AppError::Config(format!("Invalid route id: {}", id.trim())))
}
